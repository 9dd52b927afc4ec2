//! Saving a result payload as an indented JSON file.
//!
//! Export is an identity serialization: parsing the file back yields the
//! payload that was written.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::request::Operation;
use crate::ExportError;

/// Serializes `payload` as two-space indented JSON.
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if the value cannot be represented as JSON.
pub fn export_to_string<T: Serialize + ?Sized>(payload: &T) -> Result<String, ExportError> {
    serde_json::to_string_pretty(payload).map_err(ExportError::Serialize)
}

/// Writes `payload` to `path`, replacing any existing file.
///
/// # Errors
///
/// - [`ExportError::Serialize`] if the value cannot be represented as JSON.
/// - [`ExportError::Io`] if the file cannot be written.
pub fn export_result<T: Serialize + ?Sized>(payload: &T, path: &Path) -> Result<(), ExportError> {
    let mut json = export_to_string(payload)?;
    json.push('\n');
    std::fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "exported analysis result");
    Ok(())
}

/// File name such as `ats-results-1760875200000.json`.
pub fn default_export_filename(operation: Operation, now: DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!(
        "{}-results-{}.json",
        operation.slug(),
        now.timestamp_millis()
    ))
}
