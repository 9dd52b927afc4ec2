use super::*;

fn test_client(base_url: &str) -> AnalyzerClient {
    AnalyzerClient::with_base_url(base_url, 30, "ranalyzer-test")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_joins_below_base_url() {
    let client = test_client("http://localhost:8000");
    let url = client.endpoint(Operation::AtsScore.path()).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/api/ats-score");
}

#[test]
fn endpoint_keeps_path_prefix() {
    let client = test_client("https://example.com/resume/");
    let url = client.endpoint(Operation::CompareJds.path()).unwrap();
    assert_eq!(url.as_str(), "https://example.com/resume/api/compare-jds");

    let url = client.endpoint(HEALTH_PATH).unwrap();
    assert_eq!(url.as_str(), "https://example.com/resume/health");
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = AnalyzerClient::with_base_url("not a url", 30, "ua").unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }), "{err:?}");
}

#[test]
fn backend_error_message_reads_error_field() {
    let body = r#"{"status":"error","error":"Either 'file' or 'resume_text' must be provided"}"#;
    assert_eq!(
        backend_error_message(body).as_deref(),
        Some("Either 'file' or 'resume_text' must be provided")
    );
}

#[test]
fn backend_error_message_reads_string_detail() {
    let body = r#"{"detail":"Job description must be at least 200 characters"}"#;
    assert_eq!(
        backend_error_message(body).as_deref(),
        Some("Job description must be at least 200 characters")
    );
}

#[test]
fn backend_error_message_ignores_unusable_bodies() {
    assert!(backend_error_message("<html>Bad Gateway</html>").is_none());
    assert!(backend_error_message(r#"{"detail":[{"loc":["body","jd_text"]}]}"#).is_none());
    assert!(backend_error_message(r#"{"error":"  "}"#).is_none());
    assert!(backend_error_message("").is_none());
}
