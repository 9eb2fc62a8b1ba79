//! Explicit per-tab context.
//!
//! Everything one tab knows (who it is, what time it is, which pages it may
//! see) hangs off a single `TabContext` that the shell passes by reference.
//! Two tabs never share one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use frontdesk_auth::{
    GuardDecision, HostModeResolver, Identity, ModeResolver, NavigationGuard, RouteTable,
    SessionStorage, SessionStore,
};
use frontdesk_clock::{ClockOffsetService, LocalClock, SystemClock};
use frontdesk_core::{ClientConfig, TabId};

/// Upper bound on guard hops while settling a navigation.
const MAX_REDIRECTS: usize = 8;

/// Where a navigation finally lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    /// First denial notice met on the way, if any.
    pub notice: Option<String>,
    pub redirected: bool,
}

pub struct TabContext<S, M = HostModeResolver, C = SystemClock> {
    id: TabId,
    config: ClientConfig,
    session: SessionStore<S>,
    clock: Arc<ClockOffsetService<C>>,
    guard: NavigationGuard<M>,
}

impl<S: SessionStorage> TabContext<S> {
    /// Standard route table, mode derived from the config.
    pub fn new(config: ClientConfig, storage: S, clock: Arc<ClockOffsetService>) -> Self {
        let guard = NavigationGuard::new(
            RouteTable::standard(),
            HostModeResolver::from_config(&config),
        );
        Self::from_parts(config, SessionStore::new(storage), clock, guard)
    }
}

impl<S, M, C> TabContext<S, M, C>
where
    S: SessionStorage,
    M: ModeResolver,
    C: LocalClock,
{
    pub fn from_parts(
        config: ClientConfig,
        session: SessionStore<S>,
        clock: Arc<ClockOffsetService<C>>,
        guard: NavigationGuard<M>,
    ) -> Self {
        Self {
            id: TabId::new(),
            config,
            session,
            clock,
            guard,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore<S> {
        &mut self.session
    }

    pub fn clock(&self) -> &Arc<ClockOffsetService<C>> {
        &self.clock
    }

    pub fn guard(&self) -> &NavigationGuard<M> {
        &self.guard
    }

    /// Corrected current time.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Run the guard for one transition.
    pub fn navigate(&mut self, path: &str) -> GuardDecision {
        let _span = tracing::debug_span!("navigate", tab = %self.id, path).entered();
        self.guard.check(&mut self.session, path)
    }

    /// Follow guard redirects until a page is allowed.
    ///
    /// A chain longer than `MAX_REDIRECTS` ends on the login page.
    pub fn settle(&mut self, path: &str) -> Navigation {
        let mut current = path.to_string();
        let mut notice = None;
        let mut redirected = false;

        for _ in 0..MAX_REDIRECTS {
            match self.navigate(&current) {
                GuardDecision::Allow => {
                    return Navigation {
                        path: current,
                        notice,
                        redirected,
                    };
                }
                decision @ GuardDecision::Redirect { to, .. } => {
                    if notice.is_none() {
                        notice = decision.notice();
                    }
                    redirected = true;
                    current = to.to_string();
                }
            }
        }

        tracing::error!(tab = %self.id, start = path, "redirect chain did not settle");
        Navigation {
            path: self.guard.routes().login_path().to_string(),
            notice,
            redirected: true,
        }
    }

    /// Start a session and return the page it lands on.
    pub fn login(&mut self, identity: Identity) -> Navigation {
        self.session.login(identity);
        let login = self.guard.routes().login_path();
        self.settle(login)
    }

    /// End the session and return the login page.
    pub fn logout(&mut self) -> &'static str {
        self.session.logout();
        self.guard.routes().login_path()
    }
}
