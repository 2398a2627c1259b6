//! Export of the filled form to downloadable files
//!
//! Both exports are pure functions of the form and the current time; the
//! only side effect is writing the resulting file into the export
//! directory.

mod json;
mod pdf;

use crate::state::FilledForm;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use json::to_json;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no filled form to export")]
    NoForm,
    #[error("could not serialize form: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("{0}")]
    Pdf(String),
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `form_<formId>_<epochMillis>.<extension>`, with characters that are not
/// safe in file names replaced by `_`
pub fn export_file_name(form_id: &str, extension: &str, at: DateTime<Local>) -> String {
    let safe_id: String = form_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("form_{safe_id}_{}.{extension}", at.timestamp_millis())
}

/// Write the form as JSON into `dir`
pub fn save_json(
    form: Option<&FilledForm>,
    dir: &Path,
    at: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let form = form.ok_or(ExportError::NoForm)?;
    let content = to_json(form)?;
    let path = dir.join(export_file_name(&form.form_id, "json", at));
    write_file(&path, content.as_bytes())?;
    tracing::info!("Exported JSON to {}", path.display());
    Ok(path)
}

/// Lay out, render, and write the form as PDF into `dir`
pub fn save_pdf(
    form: Option<&FilledForm>,
    dir: &Path,
    at: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let form = form.ok_or(ExportError::NoForm)?;
    let generated_at = at.format("%Y-%m-%d %H:%M:%S").to_string();
    let layout = pdf::layout_form(form, &generated_at, &pdf::HelveticaMetrics);
    let bytes = pdf::render_pdf(&layout)?;
    let path = dir.join(export_file_name(&form.form_id, "pdf", at));
    write_file(&path, &bytes)?;
    tracing::info!(
        "Exported {}-page PDF to {}",
        layout.pages.len(),
        path.display()
    );
    Ok(path)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, contents).map_err(io_error)
}
