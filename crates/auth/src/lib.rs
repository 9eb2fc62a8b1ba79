//! `frontdesk-auth` — per-tab session state and route-level role enforcement.
//!
//! This crate is decoupled from the browser: persistence goes through the
//! [`SessionStorage`] trait and navigation decisions are plain values, so the
//! same logic runs under wasm and in native tests.

pub mod guard;
pub mod mode;
pub mod routes;
pub mod session;
pub mod storage;
pub mod store;

pub use guard::{GuardDecision, NavigationGuard, RedirectReason};
pub use mode::{HostModeResolver, ModeResolver};
pub use routes::{Route, RouteMeta, RouteTable};
pub use session::{AUTH_STORAGE_KEY, Identity, PersistedAuthRecord, RecordError};
pub use storage::{MemoryStorage, SessionStorage, StorageError};
pub use store::SessionStore;
