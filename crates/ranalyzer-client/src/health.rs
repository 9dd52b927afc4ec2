//! Background health polling.
//!
//! [`HealthMonitor`] owns a task that probes the backend on a fixed interval
//! and publishes the result on a `watch` channel. The task stops when the
//! monitor is dropped, so a torn-down view leaves no timer behind.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::AnalyzerClient;

/// Last known reachability of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// No probe has completed yet.
    Unknown,
    Connected,
    Disconnected,
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Connected => write!(f, "connected"),
            Self::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Handle to a running health poller.
pub struct HealthMonitor {
    status: watch::Receiver<BackendStatus>,
    retry: Arc<Notify>,
    task: JoinHandle<()>,
}

impl HealthMonitor {
    /// Starts polling: one probe immediately, then one per `interval`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(client: Arc<AnalyzerClient>, interval: Duration) -> Self {
        let (tx, status) = watch::channel(BackendStatus::Unknown);
        let retry = Arc::new(Notify::new());
        let task = tokio::spawn(poll(client, interval, tx, Arc::clone(&retry)));
        Self {
            status,
            retry,
            task,
        }
    }

    pub fn status(&self) -> BackendStatus {
        *self.status.borrow()
    }

    /// A receiver that observes every status change.
    pub fn subscribe(&self) -> watch::Receiver<BackendStatus> {
        self.status.clone()
    }

    /// Probes again now instead of waiting for the next tick.
    pub fn retry(&self) {
        self.retry.notify_one();
    }

    /// Stops polling.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll(
    client: Arc<AnalyzerClient>,
    interval: Duration,
    tx: watch::Sender<BackendStatus>,
    retry: Arc<Notify>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            () = retry.notified() => ticker.reset(),
        }

        let next = client.probe().await;
        let changed = tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        if changed {
            if next == BackendStatus::Connected {
                tracing::info!(base_url = %client.base_url(), "backend connected");
            } else {
                tracing::warn!(base_url = %client.base_url(), "backend disconnected");
            }
        }
    }
}
