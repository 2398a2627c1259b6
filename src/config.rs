//! Configuration handling for the TUI

use anyhow::Result;
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Backend address used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:6001";
/// Environment variable overriding the backend address
pub const API_URL_ENV: &str = "FORMFILL_API_URL";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormFillConfig {
    /// Backend base URL
    pub api_base_url: Option<String>,
    /// Directory exported JSON/PDF files are written to
    pub export_dir: Option<PathBuf>,
    /// Timeout for a single backend request
    pub request_timeout_secs: Option<u64>,
}

impl FormFillConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "formfill", "formfill-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FormFillConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Backend base URL: environment first, then the config file, then the default
    pub fn api_base_url(&self) -> String {
        Self::resolve_api_url(std::env::var(API_URL_ENV).ok(), self.api_base_url.as_deref())
    }

    fn resolve_api_url(env: Option<String>, configured: Option<&str>) -> String {
        env.filter(|v| !v.trim().is_empty())
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Export directory: configured, else the user's download directory, else `.`
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(|| UserDirs::new().and_then(|d| d.download_dir().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormFillConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.export_dir.is_none());
        assert!(config.request_timeout_secs.is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_serialization() {
        let config = FormFillConfig {
            api_base_url: Some("http://10.0.0.5:6001".to_string()),
            export_dir: Some(PathBuf::from("/tmp/forms")),
            request_timeout_secs: Some(15),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: FormFillConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.api_base_url, Some("http://10.0.0.5:6001".to_string()));
        assert_eq!(parsed.export_dir, Some(PathBuf::from("/tmp/forms")));
        assert_eq!(parsed.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormFillConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"api_base_url": "http://x", "theme": "dark"}"#;
        let parsed: FormFillConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_base_url, Some("http://x".to_string()));
    }

    #[test]
    fn test_api_url_precedence() {
        assert_eq!(
            FormFillConfig::resolve_api_url(Some("http://env".into()), Some("http://file")),
            "http://env"
        );
        assert_eq!(
            FormFillConfig::resolve_api_url(Some("  ".into()), Some("http://file")),
            "http://file"
        );
        assert_eq!(FormFillConfig::resolve_api_url(None, None), DEFAULT_API_URL);
    }

    #[test]
    fn test_configured_export_dir_wins() {
        let config = FormFillConfig {
            export_dir: Some(PathBuf::from("/srv/exports")),
            ..Default::default()
        };
        assert_eq!(config.export_dir(), PathBuf::from("/srv/exports"));
    }

    #[test]
    fn test_load_returns_ok() {
        // Either the user's config or the default
        assert!(FormFillConfig::load().is_ok());
    }
}
