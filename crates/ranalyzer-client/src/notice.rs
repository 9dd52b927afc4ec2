//! Auto-expiring error notices.
//!
//! Posting a notice shows it immediately and schedules its removal after a
//! fixed delay. A newer notice replaces the old one together with its timer.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// The single user-visible error slot of a session.
pub struct NoticeBoard {
    tx: Arc<watch::Sender<Option<String>>>,
    ttl: Duration,
    pending_clear: Mutex<Option<JoinHandle<()>>>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            ttl,
            pending_clear: Mutex::new(None),
        }
    }

    /// Shows `message` and clears it after the configured delay.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn post(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_replace(Some(message.clone()));

        let tx = Arc::clone(&self.tx);
        let ttl = self.ttl;
        let clear = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            tx.send_if_modified(|current| {
                if current.as_deref() == Some(message.as_str()) {
                    *current = None;
                    true
                } else {
                    false
                }
            });
        });

        let previous = self
            .pending_clear
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(clear);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Removes the current notice now.
    pub fn clear(&self) {
        if let Some(pending) = self
            .pending_clear
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
        self.tx.send_replace(None);
    }

    pub fn current(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

impl Drop for NoticeBoard {
    fn drop(&mut self) {
        if let Some(pending) = self
            .pending_clear
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
    }
}
