pub mod client;
pub mod error;
pub mod health;
pub mod notice;
pub mod session;

pub use client::AnalyzerClient;
pub use error::{ClientError, SessionError};
pub use health::{BackendStatus, HealthMonitor};
pub use notice::NoticeBoard;
pub use session::AnalysisSession;
