//! Plain-text rendering of analysis results for the terminal.

use std::fmt::Write;

use ranalyzer_core::{
    band_for, round_score, AnalysisKind, CompareEntry, CompareSummary, ScoredResult,
};

/// Formats a scored ATS or match result.
pub(crate) fn render_result(result: &ScoredResult<'_>) -> String {
    let band = result.band();
    let payload = result.payload;
    let mut out = String::new();

    let headline = match result.kind {
        AnalysisKind::Ats => format!(
            "ATS Compatibility Score: {}/100 - {} ({})",
            result.display_score(),
            band.label,
            band.color
        ),
        AnalysisKind::Match => format!(
            "Job Match: {}% - {} ({})",
            result.display_score(),
            band.label,
            band.color
        ),
    };
    out.push_str(&headline);
    out.push('\n');

    let breakdown = payload.breakdown();
    if !breakdown.is_empty() {
        out.push_str("\nScore breakdown:\n");
        let width = breakdown
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        for (name, score) in &breakdown {
            let _ = writeln!(
                out,
                "  {:<width$}  {}",
                name.replace('_', " "),
                fmt_number(*score)
            );
        }
    }

    push_inline(&mut out, "Skills found", &payload.skills_found());
    push_inline(&mut out, "Missing skills", &payload.missing_skills());
    push_list(&mut out, "Strengths", &payload.strengths());
    push_list(&mut out, "Weaknesses", &payload.weaknesses());
    push_list(&mut out, "Gaps", &payload.gaps());
    push_list(&mut out, "Recommendations", &payload.recommendations());

    if let Some(assessment) = payload.final_assessment() {
        let _ = write!(out, "\nFinal assessment:\n  {assessment}\n");
    }

    out.trim_end().to_string()
}

/// Formats a multi-JD comparison. `labels[i]` names the job description
/// submitted at position `i`.
pub(crate) fn render_comparison(summary: &CompareSummary, labels: &[String]) -> String {
    let label_for = |index: Option<usize>| -> String {
        match index {
            Some(i) => labels
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("JD #{}", i + 1)),
            None => "unknown JD".to_string(),
        }
    };

    let mut out = format!("Compared {} job descriptions\n", summary.total_jds);
    if let Some(best) = summary.best_match_index {
        let _ = writeln!(out, "Best match: {}", label_for(Some(best)));
    }
    out.push('\n');

    for entry in &summary.entries {
        match entry {
            CompareEntry::Matched { jd_index, payload } => {
                let score = payload.score(AnalysisKind::Match).unwrap_or_default();
                let band = band_for(score, AnalysisKind::Match);
                let _ = writeln!(
                    out,
                    "  {:>3}%  {} ({})  {}",
                    round_score(score),
                    band.label,
                    band.color,
                    label_for(Some(*jd_index))
                );
            }
            CompareEntry::Failed { jd_index, error } => {
                let _ = writeln!(out, "  error  {}: {error}", label_for(*jd_index));
            }
        }
    }

    out.trim_end().to_string()
}

fn push_inline(out: &mut String, title: &str, items: &[String]) {
    if !items.is_empty() {
        let _ = write!(out, "\n{title}: {}\n", items.join(", "));
    }
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = write!(out, "\n{title} ({}):\n", items.len());
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

/// `20` for whole numbers, `18.5` otherwise.
fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let formatted = format!("{value:.2}");
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
