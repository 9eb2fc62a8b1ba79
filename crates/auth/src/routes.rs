//! Static route table and its auth metadata.

use frontdesk_core::Role;

pub const LOGIN_PATH: &str = "/login";

/// Auth requirement attached to a route.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// `None` on an auth-required route accepts any active session.
    pub role: Option<Role>,
}

impl RouteMeta {
    pub const fn public() -> Self {
        Self {
            requires_auth: false,
            role: None,
        }
    }

    pub const fn role(role: Role) -> Self {
        Self {
            requires_auth: true,
            role: Some(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub meta: RouteMeta,
    /// Alias routes forward to another path and carry no meta of their own.
    pub redirect: Option<&'static str>,
}

impl Route {
    pub const fn page(path: &'static str, name: &'static str, meta: RouteMeta) -> Self {
        Self {
            path,
            name: Some(name),
            meta,
            redirect: None,
        }
    }

    pub const fn alias(path: &'static str, target: &'static str) -> Self {
        Self {
            path,
            name: None,
            meta: RouteMeta::public(),
            redirect: Some(target),
        }
    }
}

/// Immutable route table, fixed when the router is built.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    login: &'static str,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, login: &'static str) -> Self {
        Self { routes, login }
    }

    /// Login page plus one landing page per role; `/` forwards to the guest page.
    pub fn standard() -> Self {
        Self::new(
            vec![
                Route::alias("/", "/guest"),
                Route::page(LOGIN_PATH, "login", RouteMeta::public()),
                Route::page("/guest", "guest", RouteMeta::role(Role::Guest)),
                Route::page("/clerk", "clerk", RouteMeta::role(Role::Clerk)),
                Route::page("/manager", "manager", RouteMeta::role(Role::Manager)),
            ],
            LOGIN_PATH,
        )
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn login_path(&self) -> &'static str {
        self.login
    }

    pub fn is_login(&self, route: &Route) -> bool {
        route.path == self.login
    }

    /// Find the page a path lands on, following aliases.
    ///
    /// Query strings, fragments and a trailing slash are ignored. Alias cycles
    /// resolve to `None`.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let mut current = self.find(normalize_path(path))?;
        for _ in 0..self.routes.len() {
            match current.redirect {
                Some(target) => current = self.find(normalize_path(target))?,
                None => return Some(current),
            }
        }
        None
    }

    /// Landing page of a role, if the table maps one.
    pub fn home_for(&self, role: Role) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.redirect.is_none() && route.meta.role == Some(role))
    }

    fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
