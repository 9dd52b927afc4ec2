use thiserror::Error;

use ranalyzer_core::AnalysisFailure;

/// Errors returned by [`AnalyzerClient`](crate::AnalyzerClient) outside the
/// submission path. Submissions never fail; they return an envelope instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying `reqwest::Client` could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The health probe got no answer, or a non-2xx one.
    #[error("backend unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },
}

/// Errors returned by [`AnalysisSession::run`](crate::AnalysisSession::run).
#[derive(Debug, Error)]
pub enum SessionError {
    /// Local validation rejected the request; nothing was sent.
    #[error("{0}")]
    Invalid(String),

    /// Another submission from this session is still outstanding.
    #[error("an analysis is already in progress")]
    Busy,

    #[error(transparent)]
    Failed(#[from] AnalysisFailure),
}
