//! `ats`, `match` and `compare` command handlers.
//!
//! Inputs are gathered from flags and files, checked locally, then handed to
//! an [`AnalysisSession`]. Oversized or unsupported documents are rejected
//! from their metadata before the file is read.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Utc;

use ranalyzer_client::{AnalysisSession, AnalyzerClient, SessionError};
use ranalyzer_core::{
    default_export_filename, export_result, export_to_string, validate_file,
    validate_resume_and_jd, AnalysisRequest, AppConfig, FailureOrigin, FileInfo, Operation,
    ResultPayload, ResumeFile, UploadCandidate, ValidationResult,
};

use crate::render;
use crate::{OutputArgs, ResumeArgs};

/// Resume inputs before the document, if any, is loaded.
struct RawResume {
    text: Option<String>,
    file: Option<(PathBuf, FileInfo)>,
}

fn read_raw_resume(resume: &ResumeArgs) -> anyhow::Result<RawResume> {
    let text = match (&resume.text, &resume.text_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(read_text(path)?),
        (None, None) => None,
    };
    let file = match &resume.file {
        Some(path) => Some((path.clone(), FileInfo::from_path(path)?)),
        None => None,
    };
    Ok(RawResume { text, file })
}

fn into_candidate(raw: RawResume) -> anyhow::Result<UploadCandidate> {
    let file = match raw.file {
        Some((path, info)) => {
            ensure_valid(validate_file(Some(&info)))?;
            Some(ResumeFile::read(&path)?)
        }
        None => None,
    };
    Ok(UploadCandidate::from_inputs(raw.text, file)?)
}

/// Builds the resume candidate for `ats` and `compare`.
pub(crate) fn load_candidate(resume: &ResumeArgs) -> anyhow::Result<UploadCandidate> {
    into_candidate(read_raw_resume(resume)?)
}

/// Builds the resume candidate for `match`, checking resume and job
/// description together first.
pub(crate) fn load_candidate_for_match(
    resume: &ResumeArgs,
    jd_text: Option<&str>,
) -> anyhow::Result<UploadCandidate> {
    let raw = read_raw_resume(resume)?;
    ensure_valid(validate_resume_and_jd(
        raw.text.as_deref(),
        raw.file.as_ref().map(|(_, info)| info),
        jd_text,
    ))?;
    into_candidate(raw)
}

pub(crate) fn load_jd(jd: Option<String>, jd_file: Option<&Path>) -> anyhow::Result<Option<String>> {
    match (jd, jd_file) {
        (Some(jd), _) => Ok(Some(jd)),
        (None, Some(path)) => Ok(Some(read_text(path)?)),
        (None, None) => Ok(None),
    }
}

pub(crate) fn load_jd_files(paths: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    paths.iter().map(|path| read_text(path)).collect()
}

/// Display names for compared job descriptions: their file names.
pub(crate) fn jd_labels(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            path.file_name().map_or_else(
                || path.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            )
        })
        .collect()
}

/// Submits `request` and prints or exports the result.
pub(crate) async fn run(
    client: AnalyzerClient,
    config: &AppConfig,
    request: &AnalysisRequest,
    output: &OutputArgs,
    jd_labels: &[String],
) -> anyhow::Result<()> {
    let session = AnalysisSession::new(Arc::new(client), config);
    let operation = request.operation();
    tracing::info!(%operation, "running analysis");

    let payload = match session.run(request).await {
        Ok(payload) => payload,
        Err(SessionError::Failed(failure)) if failure.origin == FailureOrigin::Transport => {
            bail!("{}\nCheck the backend with `ranalyzer health`.", failure.message)
        }
        Err(e) => return Err(e.into()),
    };

    if output.json {
        println!("{}", export_to_string(&payload)?);
    } else {
        println!("{}", render_payload(operation, &payload, jd_labels)?);
    }

    if let Some(export) = &output.export {
        let path = export
            .clone()
            .unwrap_or_else(|| default_export_filename(operation, Utc::now()));
        export_result(&payload, &path)?;
        eprintln!("Saved results to {}", path.display());
    }

    Ok(())
}

fn render_payload(
    operation: Operation,
    payload: &ResultPayload,
    jd_labels: &[String],
) -> anyhow::Result<String> {
    match operation {
        Operation::AtsScore | Operation::JdMatch => {
            Ok(render::render_result(&payload.scored(operation.kind())?))
        }
        Operation::CompareJds => {
            let summary = ranalyzer_core::CompareSummary::from_payload(payload)?;
            Ok(render::render_comparison(&summary, jd_labels))
        }
    }
}

fn ensure_valid(result: ValidationResult) -> anyhow::Result<()> {
    if result.is_valid() {
        return Ok(());
    }
    bail!(result
        .reason
        .unwrap_or_else(|| "invalid input".to_string()))
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_valid_passes_valid_results() {
        assert!(ensure_valid(ValidationResult::ok()).is_ok());
    }

    #[test]
    fn ensure_valid_reports_the_reason() {
        let err = ensure_valid(ValidationResult::fail("No file selected")).unwrap_err();
        assert_eq!(err.to_string(), "No file selected");
    }
}
