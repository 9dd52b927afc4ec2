//! Resume inputs: pasted text or an uploaded document.
//!
//! [`UploadCandidate`] is a tagged union, so a submission always carries
//! exactly one resume source. [`FileInfo`] holds the metadata the validator
//! needs; [`ResumeFile`] adds the bytes the transport client uploads.

use std::path::Path;

use crate::CandidateError;

/// Name and size of a resume document, without its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Reads name and size from the filesystem without loading the file.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError::Io`] if the file metadata cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, CandidateError> {
        let metadata = std::fs::metadata(path).map_err(|source| CandidateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(file_name_of(path), metadata.len()))
    }

    /// Lowercased, dot-prefixed substring after the last `.` in the name.
    ///
    /// Returns an empty string when the name has no dot.
    pub fn extension(&self) -> String {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default()
    }

    /// Size in MiB with two decimals, e.g. `"10.00"`.
    #[allow(clippy::cast_precision_loss)]
    pub fn size_mb(&self) -> String {
        format!("{:.2}", self.size_bytes as f64 / 1024.0 / 1024.0)
    }

    /// MIME type sent with the multipart file part.
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_str() {
            ".pdf" => "application/pdf",
            ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ".doc" => "application/msword",
            _ => "application/octet-stream",
        }
    }
}

/// A resume document with its contents loaded in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    info: FileInfo,
    contents: Vec<u8>,
}

impl ResumeFile {
    /// Wraps in-memory bytes. The recorded size is the byte length.
    pub fn from_bytes(name: impl Into<String>, contents: Vec<u8>) -> Self {
        let size_bytes = contents.len() as u64;
        Self {
            info: FileInfo::new(name, size_bytes),
            contents,
        }
    }

    /// Loads a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError::Io`] if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self, CandidateError> {
        let contents = std::fs::read(path).map_err(|source| CandidateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_bytes(file_name_of(path), contents))
    }

    pub fn info(&self) -> &FileInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

/// The resume half of an analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadCandidate {
    Text(String),
    File(ResumeFile),
}

impl UploadCandidate {
    /// Builds a candidate from the two optional form inputs.
    ///
    /// Blank text counts as absent. When both are supplied the file is used
    /// and the text is dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError::Missing`] when neither input is present.
    pub fn from_inputs(
        text: Option<String>,
        file: Option<ResumeFile>,
    ) -> Result<Self, CandidateError> {
        let text = text.filter(|t| !t.trim().is_empty());
        match (text, file) {
            (Some(_), Some(file)) => {
                tracing::warn!(
                    file = file.name(),
                    "both resume text and file supplied; submitting the file"
                );
                Ok(Self::File(file))
            }
            (None, Some(file)) => Ok(Self::File(file)),
            (Some(text), None) => Ok(Self::Text(text)),
            (None, None) => Err(CandidateError::Missing),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::File(_) => None,
        }
    }
}

/// Human-readable byte count: `"0 Bytes"`, `"1.5 KB"`, `"10 MB"`.
///
/// Values are rounded to at most two decimals with trailing zeros dropped.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let bytes = bytes as f64;
    let exponent = (bytes.ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes / 1024_f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    let mut number = format!("{rounded:.2}");
    while number.ends_with('0') {
        number.pop();
    }
    if number.ends_with('.') {
        number.pop();
    }
    format!("{number} {}", UNITS[exponent])
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
