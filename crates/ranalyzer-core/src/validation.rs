//! Client-side input checks run before any request is sent.
//!
//! Every check returns a [`ValidationResult`] instead of an error so callers
//! can show the reason directly. Composite checks stop at the first failure.

use crate::candidate::{FileInfo, UploadCandidate};
use crate::constants::{JD_MIN_LENGTH, MAX_FILE_SIZE_BYTES, RESUME_MIN_LENGTH, SUPPORTED_FORMATS};

/// Outcome of a validation check: pass, or fail with one reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub reason: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Chains another check, evaluated only if this one passed.
    #[must_use]
    pub fn and_then(self, next: impl FnOnce() -> ValidationResult) -> ValidationResult {
        if self.valid {
            next()
        } else {
            self
        }
    }
}

/// Checks pasted resume text: present, and at least [`RESUME_MIN_LENGTH`]
/// characters once trimmed.
pub fn validate_resume_text(text: Option<&str>) -> ValidationResult {
    let Some(trimmed) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return ValidationResult::fail("Resume text is empty");
    };

    let length = trimmed.chars().count();
    if length < RESUME_MIN_LENGTH {
        return ValidationResult::fail(format!(
            "Resume must be at least {RESUME_MIN_LENGTH} characters. Current: {length}"
        ));
    }

    ValidationResult::ok()
}

/// Checks an uploaded resume: present, at most [`MAX_FILE_SIZE_BYTES`], and
/// one of [`SUPPORTED_FORMATS`].
pub fn validate_file(file: Option<&FileInfo>) -> ValidationResult {
    let Some(file) = file else {
        return ValidationResult::fail("No file selected");
    };

    if file.size_bytes > MAX_FILE_SIZE_BYTES {
        return ValidationResult::fail(format!(
            "File size exceeds 10MB limit. Current size: {}MB",
            file.size_mb()
        ));
    }

    let extension = file.extension();
    if !SUPPORTED_FORMATS.contains(&extension.as_str()) {
        return ValidationResult::fail(format!(
            "Invalid file format. Supported formats: {}",
            SUPPORTED_FORMATS.join(", ")
        ));
    }

    ValidationResult::ok()
}

/// Checks a job description: present, and at least [`JD_MIN_LENGTH`]
/// characters once trimmed.
pub fn validate_jd_text(text: Option<&str>) -> ValidationResult {
    let Some(trimmed) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return ValidationResult::fail("Job description is empty. Please provide a job description");
    };

    let length = trimmed.chars().count();
    if length < JD_MIN_LENGTH {
        return ValidationResult::fail(format!(
            "Job description must be at least {JD_MIN_LENGTH} characters. Current: {length}"
        ));
    }

    ValidationResult::ok()
}

/// Checks every job description of a comparison. The list must not be empty;
/// the first short entry is reported by its 1-based position.
pub fn validate_jd_texts<S: AsRef<str>>(texts: &[S]) -> ValidationResult {
    if texts.is_empty() {
        return ValidationResult::fail("At least one job description is required");
    }

    for (index, text) in texts.iter().enumerate() {
        let result = validate_jd_text(Some(text.as_ref()));
        if let Some(reason) = result.reason {
            return ValidationResult::fail(format!("Job description #{}: {reason}", index + 1));
        }
    }

    ValidationResult::ok()
}

/// Checks whichever resume source the candidate carries.
pub fn validate_candidate(candidate: &UploadCandidate) -> ValidationResult {
    match candidate {
        UploadCandidate::Text(text) => validate_resume_text(Some(text)),
        UploadCandidate::File(file) => validate_file(Some(file.info())),
    }
}

/// Checks raw form inputs for a job-description match.
///
/// Fails straight away when no resume is given. Otherwise checks the text (if
/// any), then the file (if any), then the job description.
pub fn validate_resume_and_jd(
    resume_text: Option<&str>,
    resume_file: Option<&FileInfo>,
    jd_text: Option<&str>,
) -> ValidationResult {
    let resume_text = resume_text.filter(|t| !t.is_empty());
    if resume_text.is_none() && resume_file.is_none() {
        return ValidationResult::fail("Please provide resume text or upload a file");
    }

    let mut result = ValidationResult::ok();
    if resume_text.is_some() {
        result = result.and_then(|| validate_resume_text(resume_text));
    }
    if resume_file.is_some() {
        result = result.and_then(|| validate_file(resume_file));
    }
    result.and_then(|| validate_jd_text(jd_text))
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
