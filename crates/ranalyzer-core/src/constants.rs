//! Input limits, accepted formats, and timing defaults shared by every crate.

/// Minimum resume length, in characters, after trimming surrounding whitespace.
pub const RESUME_MIN_LENGTH: usize = 500;

/// Minimum job-description length, in characters, after trimming.
pub const JD_MIN_LENGTH: usize = 200;

/// Largest accepted upload: 10 MiB. A file of exactly this size is accepted.
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted resume file extensions, lowercase and dot-prefixed.
pub const SUPPORTED_FORMATS: [&str; 3] = [".pdf", ".docx", ".doc"];

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Interval between background health probes.
pub const HEALTH_POLL_INTERVAL_SECS: u64 = 30;

/// How long an error notice stays visible before it clears itself.
pub const ERROR_DISPLAY_SECS: u64 = 6;
