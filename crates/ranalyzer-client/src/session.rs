//! One user's analysis session: validate, submit, surface failures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ranalyzer_core::{AnalysisRequest, AppConfig, ResultPayload};

use crate::client::AnalyzerClient;
use crate::error::SessionError;
use crate::notice::NoticeBoard;

/// Runs analyses for a single session.
///
/// Requests are validated locally before anything is sent, at most one
/// submission is outstanding at a time, and every failure is posted to the
/// session's [`NoticeBoard`].
pub struct AnalysisSession {
    client: Arc<AnalyzerClient>,
    notices: NoticeBoard,
    in_flight: AtomicBool,
}

impl AnalysisSession {
    pub fn new(client: Arc<AnalyzerClient>, config: &AppConfig) -> Self {
        Self::with_notice_board(client, NoticeBoard::new(config.error_display()))
    }

    pub fn with_notice_board(client: Arc<AnalyzerClient>, notices: NoticeBoard) -> Self {
        Self {
            client,
            notices,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validates and submits `request`, returning the result payload.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Invalid`] if local validation fails; no request is sent.
    /// - [`SessionError::Busy`] if another submission is still running.
    /// - [`SessionError::Failed`] if the backend could not be reached or
    ///   reported a failure.
    pub async fn run(&self, request: &AnalysisRequest) -> Result<ResultPayload, SessionError> {
        if let Some(reason) = request.validate().reason {
            self.notices.post(reason.clone());
            return Err(SessionError::Invalid(reason));
        }

        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(SessionError::Busy)?;

        let response = self.client.submit(request).await;
        response.into_result().map_err(|failure| {
            self.notices.post(failure.message.clone());
            SessionError::Failed(failure)
        })
    }
}

/// Holds the session's in-flight flag until dropped.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
