//! Process-wide clock offset for one tab.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use chrono::{DateTime, Utc};

use crate::source::{LocalClock, SystemClock, TimeSource};

/// Signed correction `authoritative - local`, in milliseconds.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockOffset(i64);

impl ClockOffset {
    pub const ZERO: ClockOffset = ClockOffset(0);

    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn between(authoritative_ms: i64, local_ms: i64) -> Self {
        Self(authoritative_ms.saturating_sub(local_ms))
    }

    pub fn millis(&self) -> i64 {
        self.0
    }

    pub fn apply(&self, local_ms: i64) -> i64 {
        local_ms.saturating_add(self.0)
    }
}

/// Corrected clock for one tab.
///
/// The offset starts at zero, so `now()` is usable before (or without)
/// `initialize()`. It is never persisted; every page load re-fetches.
#[derive(Debug, Default)]
pub struct ClockOffsetService<C = SystemClock> {
    clock: C,
    offset_ms: AtomicI64,
    synced: AtomicBool,
}

impl ClockOffsetService<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: LocalClock> ClockOffsetService<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            offset_ms: AtomicI64::new(0),
            synced: AtomicBool::new(false),
        }
    }

    /// Fetch the authoritative time once and store the resulting offset.
    ///
    /// Never fails: on any error the previous offset (zero on first boot) is
    /// kept and a warning is logged, so startup always proceeds.
    pub async fn initialize<T>(&self, source: &T)
    where
        T: TimeSource + ?Sized,
    {
        match source.fetch_millis().await {
            Ok(authoritative_ms) => {
                let offset = ClockOffset::between(authoritative_ms, self.clock.now_millis());
                self.offset_ms.store(offset.millis(), Ordering::Relaxed);
                self.synced.store(true, Ordering::Relaxed);
                tracing::info!(offset_ms = offset.millis(), "clock offset initialized");
            }
            Err(err) => {
                tracing::warn!(%err, "failed to sync time with server, using local clock");
            }
        }
    }

    pub fn offset(&self) -> ClockOffset {
        ClockOffset::from_millis(self.offset_ms.load(Ordering::Relaxed))
    }

    pub fn offset_millis(&self) -> i64 {
        self.offset().millis()
    }

    /// Whether an authoritative reading has been applied.
    pub fn is_synced(&self) -> bool {
        self.synced.load(Ordering::Relaxed)
    }

    pub fn now_millis(&self) -> i64 {
        self.offset().apply(self.clock.now_millis())
    }

    pub fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.now_millis()).unwrap_or_else(Utc::now)
    }
}
