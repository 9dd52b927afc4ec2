//! Response envelope and result payloads returned by the analysis backend.
//!
//! The envelope is `{"status": "success" | <other>, "data"?: {...}, "error"?: "..."}`.
//! Result payloads are loosely shaped, so [`ResultPayload`] keeps the raw JSON
//! object and offers typed accessors. Only the overall score is required,
//! through [`ResultPayload::scored`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bands::{band_for, round_score, AnalysisKind, BandLabel};
use crate::PayloadError;

/// Top-level `status` of the envelope. Anything other than `"success"` is
/// read as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    #[serde(other)]
    Error,
}

/// Where a failed analysis went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    /// The backend could not be reached, or the exchange broke mid-way.
    Transport,
    /// The backend answered and reported a failure.
    Backend { http_status: Option<u16> },
}

/// A failed analysis, as surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AnalysisFailure {
    pub origin: FailureOrigin,
    pub message: String,
}

/// The uniform outcome of every submission.
///
/// `data` is present exactly when `status` is [`ResponseStatus::Success`];
/// use the constructors or [`AnalysisResponse::normalize`] to keep it so.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResultPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Set on failures produced or classified by the client.
    #[serde(skip)]
    pub origin: Option<FailureOrigin>,
}

impl AnalysisResponse {
    pub fn success(data: ResultPayload) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            error: None,
            timestamp: None,
            origin: None,
        }
    }

    pub fn failure(origin: FailureOrigin, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            error: Some(message.into()),
            timestamp: None,
            origin: Some(origin),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Enforces the `data`-iff-success rule on a decoded envelope.
    ///
    /// A success without data becomes a backend failure with
    /// `fallback_error`; an error keeps its message (or gets the fallback)
    /// and loses any stray data.
    #[must_use]
    pub fn normalize(mut self, http_status: u16, fallback_error: &str) -> Self {
        match (self.status, self.data.is_some()) {
            (ResponseStatus::Success, true) => {
                self.error = None;
                self.origin = None;
                self
            }
            (ResponseStatus::Success, false) | (ResponseStatus::Error, _) => {
                let message = self
                    .error
                    .take()
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| fallback_error.to_string());
                Self {
                    timestamp: self.timestamp,
                    ..Self::failure(
                        FailureOrigin::Backend {
                            http_status: Some(http_status),
                        },
                        message,
                    )
                }
            }
        }
    }

    /// Splits the envelope into the payload or the failure.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisFailure`] for any non-success envelope.
    pub fn into_result(self) -> Result<ResultPayload, AnalysisFailure> {
        match (self.status, self.data) {
            (ResponseStatus::Success, Some(data)) => Ok(data),
            (_, _) => Err(AnalysisFailure {
                origin: self
                    .origin
                    .unwrap_or(FailureOrigin::Backend { http_status: None }),
                message: self.error.unwrap_or_else(|| "Unknown error".to_string()),
            }),
        }
    }
}

/// Raw analysis result as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultPayload(Map<String, Value>);

impl ResultPayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Overall score for `kind`, if present and numeric.
    pub fn score(&self, kind: AnalysisKind) -> Option<f64> {
        self.0.get(kind.score_field()).and_then(Value::as_f64)
    }

    /// Typed view with a checked score.
    ///
    /// # Errors
    ///
    /// - [`PayloadError::MissingScore`] if the score field is absent or not a number.
    /// - [`PayloadError::ScoreOutOfRange`] if it lies outside 0-100.
    pub fn scored(&self, kind: AnalysisKind) -> Result<ScoredResult<'_>, PayloadError> {
        let field = kind.score_field();
        let score = self
            .score(kind)
            .ok_or(PayloadError::MissingScore { field })?;
        if !(0.0..=100.0).contains(&score) {
            return Err(PayloadError::ScoreOutOfRange { field, score });
        }
        Ok(ScoredResult {
            kind,
            score,
            payload: self,
        })
    }

    /// Category sub-scores from `score_breakdown` or `match_breakdown`.
    pub fn breakdown(&self) -> Vec<(String, f64)> {
        ["score_breakdown", "match_breakdown"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_object))
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_f64().map(|score| (k.clone(), score)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Items of a list field. Non-string items are rendered as JSON.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First non-empty list among `keys`.
    fn first_list(&self, keys: &[&str]) -> Vec<String> {
        keys.iter()
            .map(|key| self.string_list(key))
            .find(|items| !items.is_empty())
            .unwrap_or_default()
    }

    pub fn skills_found(&self) -> Vec<String> {
        self.first_list(&["technical_skills_found", "matched_skills"])
    }

    pub fn missing_skills(&self) -> Vec<String> {
        self.string_list("missing_skills")
    }

    pub fn strengths(&self) -> Vec<String> {
        self.string_list("strengths")
    }

    pub fn weaknesses(&self) -> Vec<String> {
        self.string_list("weaknesses")
    }

    pub fn gaps(&self) -> Vec<String> {
        self.string_list("gaps")
    }

    pub fn recommendations(&self) -> Vec<String> {
        self.first_list(&["recommendations", "suggestions"])
    }

    pub fn final_assessment(&self) -> Option<&str> {
        self.0
            .get("final_assessment")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

impl From<Map<String, Value>> for ResultPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A payload whose overall score has been checked.
#[derive(Debug, Clone, Copy)]
pub struct ScoredResult<'a> {
    pub kind: AnalysisKind,
    /// Unrounded score; banding uses this value.
    pub score: f64,
    pub payload: &'a ResultPayload,
}

impl ScoredResult<'_> {
    pub fn band(&self) -> BandLabel {
        band_for(self.score, self.kind)
    }

    pub fn display_score(&self) -> i64 {
        round_score(self.score)
    }
}

/// One job description's outcome inside a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareEntry {
    Matched {
        jd_index: usize,
        payload: ResultPayload,
    },
    Failed {
        jd_index: Option<usize>,
        error: String,
    },
}

impl CompareEntry {
    pub fn jd_index(&self) -> Option<usize> {
        match self {
            Self::Matched { jd_index, .. } => Some(*jd_index),
            Self::Failed { jd_index, .. } => *jd_index,
        }
    }
}

/// Typed view of a compare-JDs payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareSummary {
    pub total_jds: usize,
    pub best_match_index: Option<usize>,
    /// In the order the backend returned them (best score first).
    pub entries: Vec<CompareEntry>,
}

impl CompareSummary {
    /// Reads `total_jds`, `best_match_index` and `results` from a payload.
    ///
    /// Entries without a numeric `overall_match_score` or `jd_index` are
    /// reported as [`CompareEntry::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::MissingField`] if `results` is not an array.
    pub fn from_payload(payload: &ResultPayload) -> Result<Self, PayloadError> {
        let results = payload
            .get("results")
            .and_then(Value::as_array)
            .ok_or(PayloadError::MissingField { field: "results" })?;

        let entries = results.iter().map(compare_entry).collect::<Vec<_>>();
        let total_jds = payload
            .get("total_jds")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(entries.len());
        let best_match_index = payload
            .get("best_match_index")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok());

        Ok(Self {
            total_jds,
            best_match_index,
            entries,
        })
    }

    /// Entry for the job description at `jd_index` in the submitted order.
    pub fn entry_for(&self, jd_index: usize) -> Option<&CompareEntry> {
        self.entries
            .iter()
            .find(|entry| entry.jd_index() == Some(jd_index))
    }
}

fn compare_entry(value: &Value) -> CompareEntry {
    let jd_index = value
        .get("jd_index")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok());
    let has_score = value
        .get(AnalysisKind::Match.score_field())
        .is_some_and(Value::is_number);

    match (jd_index, value.as_object()) {
        (Some(jd_index), Some(fields)) if has_score => CompareEntry::Matched {
            jd_index,
            payload: ResultPayload::new(fields.clone()),
        },
        _ => CompareEntry::Failed {
            jd_index,
            error: value
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("No match score returned")
                .to_string(),
        },
    }
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;
