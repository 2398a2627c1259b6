//! Errors returned by the form-filling backend client

use thiserror::Error;

/// Why a single request failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    #[error("service unreachable: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

/// A failed backend call, tagged by operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("failed to list forms: {0}")]
    Catalog(#[source] RequestFailure),
    #[error("failed to extract details: {0}")]
    Extraction(#[source] RequestFailure),
    #[error("failed to auto-fill form: {0}")]
    AutoFill(#[source] RequestFailure),
}

impl ApiError {
    /// The underlying failure without the operation prefix
    pub fn failure(&self) -> &RequestFailure {
        match self {
            Self::Catalog(f) | Self::Extraction(f) | Self::AutoFill(f) => f,
        }
    }
}

/// Longest error body kept in a [`RequestFailure::Status`] message
const MAX_BODY_CHARS: usize = 200;

/// Pull a readable message out of an error response body.
///
/// The backend answers failures with `{"error": "..."}`; anything else is
/// truncated and passed through.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.chars().take(MAX_BODY_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json_body() {
        assert_eq!(
            error_message(r#"{"error": "Form x not found"}"#),
            "Form x not found"
        );
    }

    #[test]
    fn test_error_message_from_plain_body() {
        assert_eq!(error_message("  Internal Server Error \n"), "Internal Server Error");
        assert_eq!(error_message(""), "no response body");
    }

    #[test]
    fn test_error_message_truncates() {
        let body = "x".repeat(500);
        assert_eq!(error_message(&body).len(), MAX_BODY_CHARS);
    }

    #[test]
    fn test_display_includes_operation_and_detail() {
        let err = ApiError::Extraction(RequestFailure::Status {
            status: 500,
            message: "OCR crashed".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "failed to extract details: server returned 500: OCR crashed"
        );
        assert_eq!(
            err.failure().to_string(),
            "server returned 500: OCR crashed"
        );
    }
}
