//! Application boot: clock first, then a ready tab context.

use std::sync::Arc;

use frontdesk_auth::SessionStorage;
use frontdesk_clock::{ClockOffsetService, HttpTimeSource, TimeSource};
use frontdesk_core::ClientConfig;

use crate::context::TabContext;

/// Sync the clock against `source`, then restore the persisted session.
///
/// Always yields a context: a failed sync leaves the clock on local time.
pub async fn boot<S, T>(config: ClientConfig, storage: S, source: &T) -> TabContext<S>
where
    S: SessionStorage,
    T: TimeSource + ?Sized,
{
    let clock = Arc::new(ClockOffsetService::new());
    clock.initialize(source).await;

    let mut ctx = TabContext::new(config, storage, clock);
    let restored = ctx.session_mut().check_auth();
    tracing::info!(
        tab = %ctx.id(),
        mode = ?ctx.config().mode,
        clock_synced = ctx.clock().is_synced(),
        offset_ms = ctx.clock().offset_millis(),
        restored,
        "tab booted"
    );
    ctx
}

/// [`boot`] against the API's time endpoint.
pub async fn boot_http<S: SessionStorage>(config: ClientConfig, storage: S) -> TabContext<S> {
    match HttpTimeSource::from_config(&config) {
        Ok(source) => boot(config, storage, &source).await,
        Err(err) => {
            tracing::warn!(%err, "time source unavailable, using local clock");
            let mut ctx = TabContext::new(config, storage, Arc::new(ClockOffsetService::new()));
            ctx.session_mut().check_auth();
            ctx
        }
    }
}
