//! Per-tab log correlation id.

use uuid::Uuid;

/// Identifier of one isolated browser-tab context.
///
/// Attached to log spans so lines from concurrent tabs can be told apart.
/// Never persisted: a reload gets a fresh id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TabId(Uuid);

impl TabId {
    /// UUIDv7, so ids sort by creation time in log output.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for TabId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
