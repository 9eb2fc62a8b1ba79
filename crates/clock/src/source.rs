//! Local and authoritative clock readings.

use chrono::Utc;

use crate::error::TimeSyncError;

/// Local wall clock, in milliseconds since the Unix epoch.
pub trait LocalClock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct SystemClock;

impl LocalClock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Authoritative time, in milliseconds since the Unix epoch.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait TimeSource {
    async fn fetch_millis(&self) -> Result<i64, TimeSyncError>;
}
