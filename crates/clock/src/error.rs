use thiserror::Error;

/// Failure to obtain the authoritative time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeSyncError {
    #[error("network error: {0}")]
    Network(String),
    #[error("time request timed out")]
    Timeout,
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}
