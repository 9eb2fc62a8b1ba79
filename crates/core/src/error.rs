//! Client-level error model.

use thiserror::Error;

/// Client-level error.
///
/// None of these are fatal to a running tab: callers at the session and clock
/// boundaries log them and fall back (treated as logged out, or local time).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrontdeskError {
    /// A value failed validation (e.g. an unknown role name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FrontdeskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
