//! Trait abstraction for the backend client to enable mocking in tests

use super::error::ApiError;
use crate::state::{ExtractedEntities, FilledForm, FormSummary};
use async_trait::async_trait;

/// A document ready to be posted to the extraction endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Operations offered by the form-filling backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormApi: Send + Sync {
    /// Fetch the catalog of form templates
    async fn list_forms(&self) -> Result<Vec<FormSummary>, ApiError>;

    /// Extract entities from an uploaded document
    async fn extract(&self, upload: FileUpload) -> Result<ExtractedEntities, ApiError>;

    /// Fill `form_id` from previously extracted entities.
    ///
    /// `Ok(None)` means the backend answered without a filled form.
    async fn auto_fill(
        &self,
        entities: ExtractedEntities,
        form_id: String,
    ) -> Result<Option<FilledForm>, ApiError>;
}
