//! HTTP client for the resume analysis backend.
//!
//! Wraps `reqwest` with multipart encoding of resume candidates and a single
//! failure classification path. Every submission returns an
//! [`AnalysisResponse`]: transport failures and backend-reported failures
//! both arrive as `status: error` envelopes tagged with a [`FailureOrigin`].

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::Deserialize;

use ranalyzer_core::{
    AnalysisRequest, AnalysisResponse, AppConfig, FailureOrigin, Operation, UploadCandidate,
};

use crate::error::ClientError;
use crate::health::BackendStatus;

const HEALTH_PATH: &str = "health";

/// Client for the analysis backend.
///
/// Holds the HTTP client and base URL. Use [`AnalyzerClient::new`] with the
/// loaded [`AppConfig`], or [`AnalyzerClient::with_base_url`] to point at a
/// mock server in tests. Inputs are expected to be validated already.
#[derive(Debug, Clone)]
pub struct AnalyzerClient {
    client: Client,
    base_url: Url,
}

/// Error body of a failed response. FastAPI validation failures use `detail`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl AnalyzerClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash makes `Url::join` append below any path
        // prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Probes `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unreachable`] on network failure or a non-2xx
    /// status.
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let unreachable = |reason: String| ClientError::Unreachable {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unreachable(format!("health check returned HTTP {status}")));
        }
        Ok(())
    }

    /// Runs [`health_check`](Self::health_check) and reduces it to a status.
    pub async fn probe(&self) -> BackendStatus {
        match self.health_check().await {
            Ok(()) => BackendStatus::Connected,
            Err(e) => {
                tracing::debug!(error = %e, "health probe failed");
                BackendStatus::Disconnected
            }
        }
    }

    /// Dispatches a request to the matching submission.
    pub async fn submit(&self, request: &AnalysisRequest) -> AnalysisResponse {
        match request {
            AnalysisRequest::Ats { candidate } => self.submit_ats_score(candidate).await,
            AnalysisRequest::JdMatch { candidate, jd_text } => {
                self.submit_jd_match(candidate, jd_text).await
            }
            AnalysisRequest::CompareJds {
                candidate,
                jd_texts,
            } => self.submit_multi_jd_match(candidate, jd_texts).await,
        }
    }

    /// Posts the resume to `/api/ats-score`.
    pub async fn submit_ats_score(&self, candidate: &UploadCandidate) -> AnalysisResponse {
        let operation = Operation::AtsScore;
        match candidate_form(candidate) {
            Ok(form) => self.post_form(operation, form).await,
            Err(e) => encoding_failure(operation, &e),
        }
    }

    /// Posts the resume and one job description to `/api/jd-match`.
    pub async fn submit_jd_match(
        &self,
        candidate: &UploadCandidate,
        jd_text: &str,
    ) -> AnalysisResponse {
        let operation = Operation::JdMatch;
        match candidate_form(candidate) {
            Ok(form) => {
                let form = form.text("jd_text", jd_text.to_owned());
                self.post_form(operation, form).await
            }
            Err(e) => encoding_failure(operation, &e),
        }
    }

    /// Posts the resume and every job description to `/api/compare-jds`,
    /// one `jd_texts` field per description in the given order.
    pub async fn submit_multi_jd_match(
        &self,
        candidate: &UploadCandidate,
        jd_texts: &[String],
    ) -> AnalysisResponse {
        let operation = Operation::CompareJds;
        match candidate_form(candidate) {
            Ok(form) => {
                let form = jd_texts
                    .iter()
                    .fold(form, |form, jd| form.text("jd_texts", jd.clone()));
                self.post_form(operation, form).await
            }
            Err(e) => encoding_failure(operation, &e),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends a multipart POST and classifies the outcome.
    async fn post_form(&self, operation: Operation, form: Form) -> AnalysisResponse {
        let url = match self.endpoint(operation.path()) {
            Ok(url) => url,
            Err(e) => return AnalysisResponse::failure(FailureOrigin::Transport, e.to_string()),
        };
        tracing::debug!(%url, %operation, "submitting analysis request");

        let response = match self.client.post(url).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, %operation, "analysis request did not reach the backend");
                return AnalysisResponse::failure(
                    FailureOrigin::Transport,
                    self.unreachable_message(&e),
                );
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, %operation, "failed to read analysis response body");
                return AnalysisResponse::failure(
                    FailureOrigin::Transport,
                    self.unreachable_message(&e),
                );
            }
        };

        if !status.is_success() {
            let message = backend_error_message(&body)
                .unwrap_or_else(|| operation.fallback_error().to_string());
            tracing::warn!(status = status.as_u16(), %operation, %message, "backend rejected analysis");
            return AnalysisResponse::failure(
                FailureOrigin::Backend {
                    http_status: Some(status.as_u16()),
                },
                message,
            );
        }

        match serde_json::from_str::<AnalysisResponse>(&body) {
            Ok(envelope) => {
                let envelope = envelope.normalize(status.as_u16(), operation.fallback_error());
                if let Some(message) = &envelope.error {
                    tracing::warn!(%operation, %message, "backend reported analysis failure");
                }
                envelope
            }
            Err(e) => {
                tracing::warn!(error = %e, %operation, "analysis response was not a valid envelope");
                AnalysisResponse::failure(
                    FailureOrigin::Backend {
                        http_status: Some(status.as_u16()),
                    },
                    operation.fallback_error(),
                )
            }
        }
    }

    fn unreachable_message(&self, error: &reqwest::Error) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if error.is_timeout() {
            format!("Backend server at {base} did not respond in time")
        } else {
            format!("Backend server is not running or unreachable at {base}: {error}")
        }
    }
}

/// Encodes the resume half of a submission: `resume_text` or `file`, never both.
fn candidate_form(candidate: &UploadCandidate) -> Result<Form, reqwest::Error> {
    let form = Form::new();
    match candidate {
        UploadCandidate::Text(text) => Ok(form.text("resume_text", text.clone())),
        UploadCandidate::File(file) => {
            let part = Part::bytes(file.contents().to_vec())
                .file_name(file.name().to_owned())
                .mime_str(file.info().mime_type())?;
            Ok(form.part("file", part))
        }
    }
}

fn encoding_failure(operation: Operation, error: &reqwest::Error) -> AnalysisResponse {
    tracing::warn!(error = %error, %operation, "failed to encode multipart request");
    AnalysisResponse::failure(FailureOrigin::Transport, operation.fallback_error())
}

/// Extracts the message from a failed response body, if it has one.
fn backend_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let detail = parsed.detail.and_then(|d| match d {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    });
    parsed
        .error
        .or(detail)
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
