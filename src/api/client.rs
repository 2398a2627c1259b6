//! HTTP client for the form-filling backend
//!
//! Talks to the three JSON endpoints exposed by the backend service:
//! `GET /api/forms`, `POST /api/extract` and `POST /api/auto-fill`.

use super::error::{error_message, ApiError, RequestFailure};
use super::traits::{FileUpload, FormApi};
use crate::state::{ExtractedEntities, FilledForm, FormSummary};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct FormsResponse {
    #[serde(default)]
    forms: Vec<FormSummary>,
}

#[derive(Debug, Serialize)]
struct AutoFillRequest<'a> {
    extracted_entities: &'a ExtractedEntities,
    form_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct AutoFillResponse {
    #[serde(rename = "filledForm", default)]
    filled_form: Option<FilledForm>,
}

/// Client for the form-filling backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:6001`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl FormApi for ApiClient {
    async fn list_forms(&self) -> Result<Vec<FormSummary>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/forms"))
            .send()
            .await
            .map_err(|e| ApiError::Catalog(transport(e)))?;

        let body: FormsResponse = read_json(response).await.map_err(ApiError::Catalog)?;
        Ok(body.forms)
    }

    async fn extract(&self, upload: FileUpload) -> Result<ExtractedEntities, ApiError> {
        tracing::info!(
            "Uploading {} ({} bytes) for extraction",
            upload.file_name,
            upload.bytes.len()
        );

        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime)
            .map_err(|e| ApiError::Extraction(transport(e)))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.url("/api/extract"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Extraction(transport(e)))?;

        read_json(response).await.map_err(ApiError::Extraction)
    }

    async fn auto_fill(
        &self,
        entities: ExtractedEntities,
        form_id: String,
    ) -> Result<Option<FilledForm>, ApiError> {
        tracing::info!("Auto-filling form {form_id} from {} entities", entities.len());

        let response = self
            .http
            .post(self.url("/api/auto-fill"))
            .json(&AutoFillRequest {
                extracted_entities: &entities,
                form_id: &form_id,
            })
            .send()
            .await
            .map_err(|e| ApiError::AutoFill(transport(e)))?;

        let body: AutoFillResponse = read_json(response).await.map_err(ApiError::AutoFill)?;
        Ok(body.filled_form)
    }
}

fn transport(err: reqwest::Error) -> RequestFailure {
    RequestFailure::Transport(err.to_string())
}

/// Check the status and decode a JSON body
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, RequestFailure> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RequestFailure::Status {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    let body = response.bytes().await.map_err(transport)?;
    serde_json::from_slice(&body).map_err(|e| RequestFailure::Decode(e.to_string()))
}
