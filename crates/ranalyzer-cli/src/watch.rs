//! `health` and `watch` command handlers.

use std::sync::Arc;

use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};

use ranalyzer_client::{AnalyzerClient, BackendStatus, HealthMonitor, NoticeBoard};
use ranalyzer_core::AppConfig;

/// One-shot health probe.
pub(crate) async fn run_health(client: &AnalyzerClient) -> anyhow::Result<()> {
    match client.health_check().await {
        Ok(()) => {
            println!("Backend connected at {}", client.base_url());
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, "health check failed");
            anyhow::bail!(not_running_message(client))
        }
    }
}

/// Polls backend health until Ctrl-C. Each line read from stdin triggers an
/// immediate retry.
pub(crate) async fn run_watch(client: AnalyzerClient, config: &AppConfig) -> anyhow::Result<()> {
    let client = Arc::new(client);
    let monitor = HealthMonitor::spawn(Arc::clone(&client), config.health_poll_interval());
    let notices = NoticeBoard::new(config.error_display());

    let mut status_rx = monitor.subscribe();
    let mut notice_rx = notices.subscribe();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    tracing::info!(
        base_url = %client.base_url(),
        interval_secs = config.health_poll_secs,
        "watching backend health"
    );
    eprintln!("Press Enter to retry now, Ctrl-C to stop.");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = *status_rx.borrow_and_update();
                println!("[{}] backend {status}", Local::now().format("%H:%M:%S"));
                if status == BackendStatus::Disconnected {
                    notices.post(not_running_message(&client));
                }
            }
            changed = notice_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(message) = notice_rx.borrow_and_update().clone() {
                    eprintln!("error: {message}");
                }
            }
            line = stdin.next_line(), if stdin_open => {
                match line {
                    Ok(Some(_)) => {
                        println!("Retrying...");
                        monitor.retry();
                    }
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        tracing::warn!(error = %e, "stdin closed");
                        stdin_open = false;
                    }
                }
            }
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "failed to listen for ctrl-c");
                }
                break;
            }
        }
    }

    monitor.shutdown();
    Ok(())
}

fn not_running_message(client: &AnalyzerClient) -> String {
    format!(
        "Backend server is not running. Please start the server at {}",
        client.base_url().as_str().trim_end_matches('/')
    )
}
