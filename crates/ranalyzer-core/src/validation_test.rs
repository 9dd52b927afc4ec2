use super::*;
use crate::candidate::ResumeFile;

fn text_of(len: usize) -> String {
    "a".repeat(len)
}

#[test]
fn resume_text_missing_or_blank_is_empty() {
    for input in [None, Some(""), Some("   \n\t")] {
        let result = validate_resume_text(input);
        assert!(!result.valid);
        assert_eq!(result.reason.as_deref(), Some("Resume text is empty"));
    }
}

#[test]
fn resume_text_boundary_is_inclusive() {
    let short = validate_resume_text(Some(&text_of(499)));
    assert!(!short.valid);
    assert_eq!(
        short.reason.as_deref(),
        Some("Resume must be at least 500 characters. Current: 499")
    );

    assert!(validate_resume_text(Some(&text_of(500))).valid);
}

#[test]
fn resume_text_length_ignores_surrounding_whitespace() {
    let padded = format!("   {}   ", text_of(498));
    let result = validate_resume_text(Some(&padded));
    assert!(!result.valid);
    assert!(result.reason.unwrap().ends_with("Current: 498"));
}

#[test]
fn resume_text_counts_characters_not_bytes() {
    let accented = "é".repeat(500);
    assert!(validate_resume_text(Some(&accented)).valid);
}

#[test]
fn file_missing_is_rejected() {
    let result = validate_file(None);
    assert_eq!(result.reason.as_deref(), Some("No file selected"));
}

#[test]
fn file_size_boundary_is_inclusive() {
    assert!(validate_file(Some(&FileInfo::new("cv.pdf", 10_485_760))).valid);

    let result = validate_file(Some(&FileInfo::new("cv.pdf", 10_485_761)));
    assert!(!result.valid);
    assert_eq!(
        result.reason.as_deref(),
        Some("File size exceeds 10MB limit. Current size: 10.00MB")
    );
}

#[test]
fn oversized_file_reports_size_in_mb() {
    let result = validate_file(Some(&FileInfo::new("cv.pdf", 15 * 1024 * 1024 + 512 * 1024)));
    assert_eq!(
        result.reason.as_deref(),
        Some("File size exceeds 10MB limit. Current size: 15.50MB")
    );
}

#[test]
fn file_extension_is_case_insensitive() {
    for name in ["cv.PDF", "cv.Docx", "cv.doc"] {
        assert!(validate_file(Some(&FileInfo::new(name, 1024))).valid, "{name}");
    }
}

#[test]
fn unsupported_extension_lists_allowed_formats() {
    for name in ["cv.txt", "cv", "cv.pdf.exe"] {
        let result = validate_file(Some(&FileInfo::new(name, 1024)));
        assert_eq!(
            result.reason.as_deref(),
            Some("Invalid file format. Supported formats: .pdf, .docx, .doc"),
            "{name}"
        );
    }
}

#[test]
fn jd_text_boundary_is_inclusive() {
    assert!(!validate_jd_text(Some(&text_of(199))).valid);
    assert!(validate_jd_text(Some(&text_of(200))).valid);
}

#[test]
fn jd_text_missing_asks_for_a_job_description() {
    let result = validate_jd_text(None);
    assert!(!result.valid);
    assert!(result
        .reason
        .unwrap()
        .contains("Please provide a job description"));
}

#[test]
fn jd_texts_requires_at_least_one() {
    let empty: [&str; 0] = [];
    let result = validate_jd_texts(&empty);
    assert_eq!(
        result.reason.as_deref(),
        Some("At least one job description is required")
    );
}

#[test]
fn jd_texts_reports_first_short_entry_position() {
    let texts = vec![text_of(250), text_of(10), text_of(5)];
    let result = validate_jd_texts(&texts);
    assert_eq!(
        result.reason.as_deref(),
        Some("Job description #2: Job description must be at least 200 characters. Current: 10")
    );
}

#[test]
fn candidate_validation_uses_active_source() {
    let text = UploadCandidate::Text(text_of(10));
    assert!(!validate_candidate(&text).valid);

    let file = UploadCandidate::File(ResumeFile::from_bytes("cv.pdf", vec![0; 64]));
    assert!(validate_candidate(&file).valid);
}

#[test]
fn composite_without_resume_never_checks_jd() {
    let result = validate_resume_and_jd(None, None, Some(&text_of(300)));
    assert_eq!(
        result.reason.as_deref(),
        Some("Please provide resume text or upload a file")
    );

    let result = validate_resume_and_jd(None, None, None);
    assert_eq!(
        result.reason.as_deref(),
        Some("Please provide resume text or upload a file")
    );
}

#[test]
fn composite_checks_text_before_file() {
    let bad_file = FileInfo::new("cv.txt", 10);
    let result = validate_resume_and_jd(Some("short"), Some(&bad_file), Some(&text_of(300)));
    assert!(result.reason.unwrap().starts_with("Resume must be at least"));
}

#[test]
fn composite_checks_file_when_text_passes() {
    let bad_file = FileInfo::new("cv.txt", 10);
    let result =
        validate_resume_and_jd(Some(&text_of(600)), Some(&bad_file), Some(&text_of(300)));
    assert!(result.reason.unwrap().starts_with("Invalid file format"));
}

#[test]
fn composite_checks_jd_last() {
    let file = FileInfo::new("cv.pdf", 1024);
    let result = validate_resume_and_jd(None, Some(&file), Some(&text_of(20)));
    assert!(result.reason.unwrap().starts_with("Job description must be"));

    assert!(validate_resume_and_jd(None, Some(&file), Some(&text_of(200))).valid);
}

#[test]
fn resume_without_jd_passes_ats_but_not_match() {
    let resume = text_of(501);
    assert!(validate_resume_text(Some(&resume)).valid);

    let result = validate_resume_and_jd(Some(&resume), None, None);
    assert!(!result.valid);
    assert!(result
        .reason
        .unwrap()
        .contains("Please provide a job description"));
}
