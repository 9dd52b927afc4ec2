//! Integration tests for the background `HealthMonitor`.

use std::sync::Arc;
use std::time::Duration;

use ranalyzer_client::{AnalyzerClient, BackendStatus, HealthMonitor};
use tokio::sync::watch;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> Arc<AnalyzerClient> {
    Arc::new(
        AnalyzerClient::with_base_url(base_url, 5, "ranalyzer-test")
            .expect("client construction should not fail"),
    )
}

async fn wait_for(rx: &mut watch::Receiver<BackendStatus>, wanted: BackendStatus) {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|status| *status == wanted))
        .await
        .expect("status change should arrive in time")
        .expect("monitor should still be running");
}

#[tokio::test]
async fn first_probe_runs_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let monitor = HealthMonitor::spawn(test_client(&server.uri()), Duration::from_secs(3600));
    let mut rx = monitor.subscribe();
    wait_for(&mut rx, BackendStatus::Connected).await;
    assert_eq!(monitor.status(), BackendStatus::Connected);
}

#[tokio::test]
async fn retry_moves_disconnected_to_connected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .with_priority(2)
        .mount(&server)
        .await;

    let monitor = HealthMonitor::spawn(test_client(&server.uri()), Duration::from_secs(3600));
    let mut rx = monitor.subscribe();
    wait_for(&mut rx, BackendStatus::Disconnected).await;

    monitor.retry();
    wait_for(&mut rx, BackendStatus::Connected).await;
}

#[tokio::test]
async fn polls_on_the_interval() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let monitor = HealthMonitor::spawn(test_client(&server.uri()), Duration::from_millis(50));
    tokio::time::sleep(Duration::from_millis(400)).await;
    drop(monitor);

    let probes = server.received_requests().await.unwrap_or_default().len();
    assert!(probes >= 3, "expected repeated probes, got {probes}");
}

#[tokio::test]
async fn dropping_the_monitor_stops_polling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let monitor = HealthMonitor::spawn(test_client(&server.uri()), Duration::from_millis(50));
    let mut rx = monitor.subscribe();
    wait_for(&mut rx, BackendStatus::Connected).await;
    monitor.shutdown();

    // Let any probe already on the wire land before counting.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let after_shutdown = server.received_requests().await.unwrap_or_default().len();
    tokio::time::sleep(Duration::from_millis(300)).await;
    let later = server.received_requests().await.unwrap_or_default().len();
    assert_eq!(after_shutdown, later);
    assert!(rx.changed().await.is_err(), "sender should be gone after shutdown");
}
