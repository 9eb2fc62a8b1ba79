//! Operating-mode capability filter.
//!
//! A guest terminal (explicit `client` build, or any access from a
//! non-loopback host) may only act as a guest. A front-desk machine reached
//! through loopback may act as any role.

use std::collections::BTreeSet;

use frontdesk_core::{AppMode, ClientConfig, Role, is_loopback_host};

const EVERY_ROLE: &[Role] = &Role::ALL;
const GUEST_ONLY: &[Role] = &[Role::Guest];

/// Roles and route paths the current deployment permits.
///
/// The guard consumes this as an opaque filter and never caches it.
pub trait ModeResolver {
    fn allowed_roles(&self) -> BTreeSet<Role>;

    fn allowed_routes(&self) -> BTreeSet<String>;
}

impl<T: ModeResolver + ?Sized> ModeResolver for &T {
    fn allowed_roles(&self) -> BTreeSet<Role> {
        (**self).allowed_roles()
    }

    fn allowed_routes(&self) -> BTreeSet<String> {
        (**self).allowed_routes()
    }
}

/// Mode resolution from the build flag and the access host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostModeResolver {
    mode: AppMode,
    host: String,
}

impl HostModeResolver {
    pub fn new(mode: AppMode, host: impl Into<String>) -> Self {
        Self {
            mode,
            host: host.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.mode, config.host.clone())
    }

    pub fn is_server_mode(&self) -> bool {
        self.mode == AppMode::Server && is_loopback_host(&self.host)
    }

    pub fn is_client_mode(&self) -> bool {
        !self.is_server_mode()
    }

    fn roles(&self) -> &'static [Role] {
        if self.is_server_mode() {
            EVERY_ROLE
        } else {
            GUEST_ONLY
        }
    }
}

impl ModeResolver for HostModeResolver {
    fn allowed_roles(&self) -> BTreeSet<Role> {
        self.roles().iter().copied().collect()
    }

    fn allowed_routes(&self) -> BTreeSet<String> {
        self.roles().iter().map(|role| format!("/{role}")).collect()
    }
}
