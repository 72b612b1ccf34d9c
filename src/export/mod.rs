//! Export module for saving crawl results
//!
//! This module handles:
//! - Turning a completed result into file content (markdown or JSON)
//! - Writing that content to a directory

mod traits;

pub use traits::{ExportArtifact, ExportError, ExportFormat, ExportResult};

use crate::client::CrawlResult;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// MIME type used for every export
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// Produces the export content for a result
///
/// # Arguments
///
/// * `result` - The completed result; `None` means there is nothing to export
/// * `format` - Which part of the result to export
///
/// # Returns
///
/// * `Ok(Some(ExportArtifact))` - Content, file name, and MIME type
/// * `Ok(None)` - No result to export
/// * `Err(ExportError)` - The extracted data could not be serialized
///
/// Markdown is exported verbatim. JSON is the extracted data alone,
/// pretty-printed with two-space indentation; missing data exports as `null`.
pub fn export(result: Option<&CrawlResult>, format: ExportFormat) -> ExportResult<Option<ExportArtifact>> {
    let Some(result) = result else {
        tracing::debug!("Nothing to export as {}", format);
        return Ok(None);
    };

    let bytes = match format {
        ExportFormat::Markdown => result.markdown.clone().unwrap_or_default().into_bytes(),
        ExportFormat::Json => {
            let data = result.extracted_data.as_ref().unwrap_or(&serde_json::Value::Null);
            serde_json::to_string_pretty(data)?.into_bytes()
        }
    };

    Ok(Some(ExportArtifact {
        bytes,
        filename: format.filename(),
        mime_type: EXPORT_MIME_TYPE,
    }))
}

/// Writes an artifact into `directory` under its suggested file name
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(ExportError)` - Failed to write the file
pub fn save_artifact(artifact: &ExportArtifact, directory: &Path) -> ExportResult<PathBuf> {
    let path = directory.join(artifact.filename);

    let mut file = File::create(&path)?;
    file.write_all(&artifact.bytes)?;

    tracing::info!("Saved {} ({} bytes)", path.display(), artifact.bytes.len());
    Ok(path)
}
