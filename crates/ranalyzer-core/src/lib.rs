//! Inputs, validation, and result formatting for the resume analyzer client.
//!
//! Nothing in this crate touches the network; the transport lives in
//! `ranalyzer-client`.

pub mod app_config;
pub mod bands;
pub mod candidate;
pub mod config;
pub mod constants;
pub mod export;
pub mod payload;
pub mod request;
pub mod validation;

use std::path::PathBuf;

use thiserror::Error;

pub use app_config::AppConfig;
pub use bands::{band_for, round_score, AnalysisKind, BandLabel, ScoreBand, ScoreColor};
pub use candidate::{format_file_size, FileInfo, ResumeFile, UploadCandidate};
pub use config::{load_app_config, load_app_config_from_env};
pub use export::{default_export_filename, export_result, export_to_string};
pub use payload::{
    AnalysisFailure, AnalysisResponse, CompareEntry, CompareSummary, FailureOrigin,
    ResponseStatus, ResultPayload, ScoredResult,
};
pub use request::{AnalysisRequest, Operation};
pub use validation::{
    validate_candidate, validate_file, validate_jd_text, validate_jd_texts,
    validate_resume_and_jd, validate_resume_text, ValidationResult,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("Please provide resume text or upload a file")]
    Missing,

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("result is missing a numeric '{field}'")]
    MissingScore { field: &'static str },

    #[error("'{field}' is {score}, expected 0-100")]
    ScoreOutOfRange { field: &'static str, score: f64 },

    #[error("result is missing '{field}'")]
    MissingField { field: &'static str },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize result: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
