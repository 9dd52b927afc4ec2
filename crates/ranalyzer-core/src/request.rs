//! The three analyses the backend offers and what each one sends.

use crate::bands::AnalysisKind;
use crate::candidate::UploadCandidate;
use crate::validation::{validate_candidate, validate_jd_text, validate_jd_texts, ValidationResult};

/// Backend operation targeted by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AtsScore,
    JdMatch,
    CompareJds,
}

impl Operation {
    /// Path of the endpoint, relative to the backend base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::AtsScore => "api/ats-score",
            Self::JdMatch => "api/jd-match",
            Self::CompareJds => "api/compare-jds",
        }
    }

    /// Message used when a failed response carries no readable error.
    pub fn fallback_error(self) -> &'static str {
        match self {
            Self::AtsScore => "Failed to analyze resume",
            Self::JdMatch => "Failed to match resume with job description",
            Self::CompareJds => "Failed to compare job descriptions",
        }
    }

    /// Which score table applies to this operation's results.
    pub fn kind(self) -> AnalysisKind {
        match self {
            Self::AtsScore => AnalysisKind::Ats,
            Self::JdMatch | Self::CompareJds => AnalysisKind::Match,
        }
    }

    /// Short slug used in export file names.
    pub fn slug(self) -> &'static str {
        match self {
            Self::AtsScore => "ats",
            Self::JdMatch => "match",
            Self::CompareJds => "compare",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AtsScore => write!(f, "ATS score"),
            Self::JdMatch => write!(f, "JD match"),
            Self::CompareJds => write!(f, "JD comparison"),
        }
    }
}

/// A fully assembled analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Ats {
        candidate: UploadCandidate,
    },
    JdMatch {
        candidate: UploadCandidate,
        jd_text: String,
    },
    CompareJds {
        candidate: UploadCandidate,
        /// Sent in this order; results are reported against these positions.
        jd_texts: Vec<String>,
    },
}

impl AnalysisRequest {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Ats { .. } => Operation::AtsScore,
            Self::JdMatch { .. } => Operation::JdMatch,
            Self::CompareJds { .. } => Operation::CompareJds,
        }
    }

    pub fn candidate(&self) -> &UploadCandidate {
        match self {
            Self::Ats { candidate }
            | Self::JdMatch { candidate, .. }
            | Self::CompareJds { candidate, .. } => candidate,
        }
    }

    /// Runs the resume check, then the job-description checks this
    /// operation needs. Stops at the first failure.
    pub fn validate(&self) -> ValidationResult {
        let resume = validate_candidate(self.candidate());
        match self {
            Self::Ats { .. } => resume,
            Self::JdMatch { jd_text, .. } => resume.and_then(|| validate_jd_text(Some(jd_text))),
            Self::CompareJds { jd_texts, .. } => resume.and_then(|| validate_jd_texts(jd_texts)),
        }
    }
}
