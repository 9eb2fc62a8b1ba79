//! Route-level role enforcement, run before every navigation commits.

use std::collections::BTreeSet;

use frontdesk_core::Role;

use crate::mode::ModeResolver;
use crate::routes::{Route, RouteTable};
use crate::storage::SessionStorage;
use crate::store::SessionStore;

/// Outcome of one navigation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the requested path unmodified.
    Allow,
    /// Abort the requested navigation and go to `to` instead.
    Redirect {
        to: &'static str,
        reason: RedirectReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Login page requested while a session is active.
    AlreadyAuthenticated { role: Role },
    /// Auth-required page requested without a session.
    LoginRequired,
    /// Session role differs from the page's role, or the page is filtered out
    /// by the operating mode.
    AccessDenied { required: Option<Role>, actual: Role },
    /// The session's role may not act in the current operating mode.
    RoleNotPermitted { role: Role },
    /// The requested path matches no route.
    UnknownRoute,
    /// The session's role has no reachable landing page.
    NoLandingRoute { role: Role },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::Redirect { to, .. } => Some(to),
        }
    }

    pub fn reason(&self) -> Option<RedirectReason> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::Redirect { reason, .. } => Some(*reason),
        }
    }

    /// Dismissible message to show the user, for decisions that deny access.
    pub fn notice(&self) -> Option<String> {
        match self.reason()? {
            RedirectReason::AccessDenied { .. } => {
                Some("Access denied: you do not have permission to view this page.".to_string())
            }
            RedirectReason::RoleNotPermitted { role } => Some(format!(
                "The {role} role cannot sign in from this terminal. Please log in again."
            )),
            RedirectReason::NoLandingRoute { role } => Some(format!(
                "No page is available for the {role} role. Please log in again."
            )),
            RedirectReason::AlreadyAuthenticated { .. }
            | RedirectReason::LoginRequired
            | RedirectReason::UnknownRoute => None,
        }
    }
}

/// Navigation guard over a fixed route table and a mode filter.
///
/// Roles are disjoint: a mismatch always lands on the session's own page,
/// never on the requested one.
#[derive(Debug, Clone)]
pub struct NavigationGuard<M> {
    routes: RouteTable,
    mode: M,
}

impl<M: ModeResolver> NavigationGuard<M> {
    pub fn new(routes: RouteTable, mode: M) -> Self {
        Self { routes, mode }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn mode(&self) -> &M {
        &self.mode
    }

    /// Refresh the session from storage, then decide on `target`.
    pub fn check<S: SessionStorage>(
        &self,
        store: &mut SessionStore<S>,
        target: &str,
    ) -> GuardDecision {
        store.check_auth();
        let decision = self.decide(store.role(), target);

        match decision {
            GuardDecision::Allow => tracing::trace!(path = target, "navigation allowed"),
            GuardDecision::Redirect { to, reason } => {
                if decision.notice().is_some() {
                    tracing::warn!(path = target, to, ?reason, "navigation denied");
                } else {
                    tracing::debug!(path = target, to, ?reason, "navigation redirected");
                }
            }
        }

        decision
    }

    /// Pure transition: (session role, requested path) to a decision.
    pub fn decide(&self, session_role: Option<Role>, target: &str) -> GuardDecision {
        let login = self.routes.login_path();

        let Some(route) = self.routes.resolve(target) else {
            return redirect(login, RedirectReason::UnknownRoute);
        };

        let allowed_roles = self.mode.allowed_roles();
        let allowed_routes = self.mode.allowed_routes();

        let (session, filtered_role) = match session_role {
            Some(role) if allowed_roles.contains(&role) => (Some(role), None),
            Some(role) => (None, Some(role)),
            None => (None, None),
        };

        if self.routes.is_login(route) {
            // Without a reachable landing page the login page is where the
            // session belongs anyway.
            let landing = session
                .and_then(|role| self.landing(role, &allowed_routes).map(|home| (role, home)));
            return match landing {
                Some((role, home)) => {
                    redirect(home.path, RedirectReason::AlreadyAuthenticated { role })
                }
                None => GuardDecision::Allow,
            };
        }

        if !route.meta.requires_auth {
            return GuardDecision::Allow;
        }

        let Some(role) = session else {
            let reason = match filtered_role {
                Some(role) => RedirectReason::RoleNotPermitted { role },
                None => RedirectReason::LoginRequired,
            };
            return redirect(login, reason);
        };

        if route.meta.role.is_none_or(|required| required == role)
            && permitted(route, &allowed_routes)
        {
            return GuardDecision::Allow;
        }

        match self.landing(role, &allowed_routes) {
            Some(home) => redirect(
                home.path,
                RedirectReason::AccessDenied {
                    required: route.meta.role,
                    actual: role,
                },
            ),
            None => redirect(login, RedirectReason::NoLandingRoute { role }),
        }
    }

    /// The role's home page, provided the mode permits it.
    fn landing(&self, role: Role, allowed_routes: &BTreeSet<String>) -> Option<&Route> {
        self.routes
            .home_for(role)
            .filter(|home| permitted(home, allowed_routes))
    }
}

/// Role pages are subject to the mode's route filter; other pages are not.
fn permitted(route: &Route, allowed_routes: &BTreeSet<String>) -> bool {
    route.meta.role.is_none() || allowed_routes.contains(route.path)
}

fn redirect(to: &'static str, reason: RedirectReason) -> GuardDecision {
    GuardDecision::Redirect { to, reason }
}
