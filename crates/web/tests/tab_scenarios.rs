//! End-to-end tab behaviour: login, reload, guard, and clock together.

use std::sync::Arc;

use async_trait::async_trait;
use frontdesk_auth::{AUTH_STORAGE_KEY, GuardDecision, Identity, MemoryStorage, RedirectReason, SessionStorage};
use frontdesk_clock::{ClockOffsetService, TimeSource, TimeSyncError};
use frontdesk_core::{ClientConfig, Role};
use frontdesk_web::{TabContext, boot};
use proptest::prelude::*;

struct ServerClock(i64);

#[async_trait]
impl TimeSource for ServerClock {
    async fn fetch_millis(&self) -> Result<i64, TimeSyncError> {
        Ok(chrono::Utc::now().timestamp_millis() + self.0)
    }
}

fn front_desk_config() -> ClientConfig {
    ClientConfig::from_lookup(|_| None, "localhost")
}

fn home(role: Role) -> &'static str {
    match role {
        Role::Guest => "/guest",
        Role::Clerk => "/clerk",
        Role::Manager => "/manager",
    }
}

#[tokio::test]
async fn manager_reload_then_guest_page_is_denied() {
    let storage = MemoryStorage::new();

    let mut first_load = boot(front_desk_config(), storage.clone(), &ServerClock(0)).await;
    assert_eq!(first_load.login(Identity::new(Role::Manager)).path, "/manager");

    // Reload: same tab storage, fresh in-memory state.
    let mut reloaded = boot(front_desk_config(), storage, &ServerClock(0)).await;
    assert!(reloaded.session_mut().check_auth());
    assert!(reloaded.session().is_auth());
    assert_eq!(reloaded.session().role(), Some(Role::Manager));

    let decision = reloaded.navigate("/guest");
    assert_eq!(
        decision,
        GuardDecision::Redirect {
            to: "/manager",
            reason: RedirectReason::AccessDenied {
                required: Some(Role::Guest),
                actual: Role::Manager,
            },
        }
    );
    assert!(decision.notice().is_some());
}

#[tokio::test]
async fn tabs_do_not_share_sessions() {
    let mut tab_one = boot(front_desk_config(), MemoryStorage::new(), &ServerClock(0)).await;
    let mut tab_two = boot(front_desk_config(), MemoryStorage::new(), &ServerClock(0)).await;

    tab_one.login(Identity::new(Role::Clerk));
    tab_two.login(Identity::new(Role::Guest));

    assert_eq!(tab_one.settle("/clerk").path, "/clerk");
    assert_eq!(tab_two.settle("/clerk").path, "/guest");
    assert_ne!(tab_one.id(), tab_two.id());
}

#[tokio::test]
async fn corrupt_record_boots_logged_out() {
    let storage = MemoryStorage::new();
    storage.set(AUTH_STORAGE_KEY, "{\"isAuthenticated\":tru").unwrap();

    let mut ctx = boot(front_desk_config(), storage, &ServerClock(0)).await;
    assert!(!ctx.session().is_auth());
    assert_eq!(ctx.settle("/manager").path, "/login");
}

#[tokio::test]
async fn corrected_time_tracks_server_skew() {
    let skew = -7_200_000;
    let ctx = boot(front_desk_config(), MemoryStorage::new(), &ServerClock(skew)).await;

    let expected = chrono::Utc::now().timestamp_millis() + skew;
    assert!((ctx.now().timestamp_millis() - expected).abs() < 1_000);
}

#[test]
fn shared_clock_serves_every_consumer() {
    let clock = Arc::new(ClockOffsetService::new());
    let ctx = TabContext::new(front_desk_config(), MemoryStorage::new(), Arc::clone(&clock));
    assert!(Arc::ptr_eq(ctx.clock(), &clock));
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

proptest! {
    #[test]
    fn login_page_redirects_home_for_every_role(role in arb_role()) {
        let mut ctx = TabContext::new(
            front_desk_config(),
            MemoryStorage::new(),
            Arc::new(ClockOffsetService::new()),
        );
        ctx.login(Identity::new(role));
        prop_assert_eq!(ctx.navigate("/login").redirect_target(), Some(home(role)));
    }

    #[test]
    fn foreign_pages_land_on_own_home(session in arb_role(), requested in arb_role()) {
        prop_assume!(session != requested);
        let mut ctx = TabContext::new(
            front_desk_config(),
            MemoryStorage::new(),
            Arc::new(ClockOffsetService::new()),
        );
        ctx.login(Identity::new(session));
        let nav = ctx.settle(home(requested));
        prop_assert_eq!(nav.path.as_str(), home(session));
        prop_assert!(nav.notice.is_some());
    }
}
