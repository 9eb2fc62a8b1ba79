//! `frontdesk-clock` — corrected "now" derived from the server clock.
//!
//! One fetch at boot establishes a signed offset between the local clock and
//! the authoritative one; every later reading is `local + offset`. There is
//! no background re-sync.

pub mod error;
pub mod http;
pub mod offset;
pub mod source;

pub use error::TimeSyncError;
pub use http::HttpTimeSource;
pub use offset::{ClockOffset, ClockOffsetService};
pub use source::{LocalClock, SystemClock, TimeSource};
