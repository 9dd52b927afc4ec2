//! Score bands: labelled, coloured ranges used to present a 0-100 score.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which score table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Ats,
    Match,
}

impl AnalysisKind {
    /// Payload field carrying the overall score for this kind.
    pub fn score_field(self) -> &'static str {
        match self {
            Self::Ats => "ats_score",
            Self::Match => "overall_match_score",
        }
    }

    pub fn bands(self) -> &'static [ScoreBand] {
        match self {
            Self::Ats => &ATS_BANDS,
            Self::Match => &MATCH_BANDS,
        }
    }
}

/// Colour category of a band. Rendering decides what each one looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    Green,
    Blue,
    Cyan,
    Yellow,
    Red,
    Gray,
}

impl fmt::Display for ScoreColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Gray => "gray",
        };
        f.write_str(name)
    }
}

/// One row of a band table. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBand {
    pub min: u8,
    pub max: u8,
    pub label: &'static str,
    pub color: ScoreColor,
}

/// Label and colour picked for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandLabel {
    pub label: &'static str,
    pub color: ScoreColor,
}

impl From<&ScoreBand> for BandLabel {
    fn from(band: &ScoreBand) -> Self {
        Self {
            label: band.label,
            color: band.color,
        }
    }
}

/// Returned when a score lies outside 0-100 or is not a number.
pub const UNKNOWN_BAND: BandLabel = BandLabel {
    label: "Unknown",
    color: ScoreColor::Gray,
};

/// ATS compatibility bands, highest first.
pub static ATS_BANDS: [ScoreBand; 4] = [
    ScoreBand {
        min: 80,
        max: 100,
        label: "Excellent",
        color: ScoreColor::Green,
    },
    ScoreBand {
        min: 60,
        max: 79,
        label: "Good",
        color: ScoreColor::Blue,
    },
    ScoreBand {
        min: 40,
        max: 59,
        label: "Fair",
        color: ScoreColor::Yellow,
    },
    ScoreBand {
        min: 0,
        max: 39,
        label: "Needs Improvement",
        color: ScoreColor::Red,
    },
];

/// Job-description match bands, highest first.
pub static MATCH_BANDS: [ScoreBand; 5] = [
    ScoreBand {
        min: 80,
        max: 100,
        label: "Excellent Match",
        color: ScoreColor::Green,
    },
    ScoreBand {
        min: 70,
        max: 79,
        label: "Very Good Match",
        color: ScoreColor::Blue,
    },
    ScoreBand {
        min: 60,
        max: 69,
        label: "Good Match",
        color: ScoreColor::Cyan,
    },
    ScoreBand {
        min: 50,
        max: 59,
        label: "Fair Match",
        color: ScoreColor::Yellow,
    },
    ScoreBand {
        min: 0,
        max: 49,
        label: "Needs Work",
        color: ScoreColor::Red,
    },
];

/// Looks up the band for a raw, unrounded score.
///
/// Tables are walked from the highest band down and the first band whose
/// lower bound the score reaches wins, so fractional scores such as `79.5`
/// land in the band below the next integer boundary. Anything outside
/// `0..=100` (including NaN) yields [`UNKNOWN_BAND`].
pub fn band_for(score: f64, kind: AnalysisKind) -> BandLabel {
    if !(0.0..=100.0).contains(&score) {
        return UNKNOWN_BAND;
    }

    kind.bands()
        .iter()
        .find(|band| score >= f64::from(band.min))
        .map_or(UNKNOWN_BAND, BandLabel::from)
}

/// Rounds a score to the nearest integer for display. Halves round up.
#[allow(clippy::cast_possible_truncation)]
pub fn round_score(score: f64) -> i64 {
    (score + 0.5).floor() as i64
}
