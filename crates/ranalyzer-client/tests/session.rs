//! Integration tests for `AnalysisSession`.

use std::sync::Arc;
use std::time::Duration;

use ranalyzer_client::{AnalysisSession, AnalyzerClient, NoticeBoard, SessionError};
use ranalyzer_core::{AnalysisKind, AnalysisRequest, FailureOrigin, UploadCandidate};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(base_url: &str) -> AnalysisSession {
    let client = AnalyzerClient::with_base_url(base_url, 30, "ranalyzer-test")
        .expect("client construction should not fail");
    AnalysisSession::with_notice_board(Arc::new(client), NoticeBoard::new(Duration::from_secs(6)))
}

fn ats_request(len: usize) -> AnalysisRequest {
    AnalysisRequest::Ats {
        candidate: UploadCandidate::Text("r".repeat(len)),
    }
}

#[tokio::test]
async fn invalid_request_never_reaches_the_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&server.uri());
    let request = AnalysisRequest::JdMatch {
        candidate: UploadCandidate::Text("r".repeat(501)),
        jd_text: String::new(),
    };

    let err = session.run(&request).await.unwrap_err();
    match err {
        SessionError::Invalid(reason) => {
            assert!(reason.contains("Please provide a job description"), "{reason}");
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
    assert!(session.notices().current().is_some());
}

#[tokio::test]
async fn valid_ats_request_returns_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ats-score"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": { "ats_score": 91, "strengths": ["Concise"] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server.uri());
    let payload = session.run(&ats_request(501)).await.expect("analysis succeeds");
    let scored = payload.scored(AnalysisKind::Ats).unwrap();
    assert_eq!(scored.band().label, "Excellent");
    assert!(!session.is_busy());
    assert!(session.notices().current().is_none());
}

#[tokio::test]
async fn backend_failure_is_posted_as_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "status": "error",
            "error": "Internal server error: model overloaded"
        })))
        .mount(&server)
        .await;

    let session = session_for(&server.uri());
    let err = session.run(&ats_request(600)).await.unwrap_err();
    match err {
        SessionError::Failed(failure) => {
            assert_eq!(
                failure.origin,
                FailureOrigin::Backend {
                    http_status: Some(500)
                }
            );
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(
        session.notices().current().as_deref(),
        Some("Internal server error: model overloaded")
    );
    assert!(!session.is_busy());
}

#[tokio::test]
async fn overlapping_submission_is_refused() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ats-score"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "status": "success",
                    "data": { "ats_score": 50 }
                }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server.uri());
    let request = ats_request(700);
    let (first, second) = tokio::join!(session.run(&request), session.run(&request));

    assert!(first.is_ok(), "{first:?}");
    assert!(matches!(second, Err(SessionError::Busy)), "{second:?}");
    assert!(!session.is_busy());
}
