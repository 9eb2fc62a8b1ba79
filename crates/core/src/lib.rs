//! `frontdesk-core` — shared primitives for the front-desk client.
//!
//! This crate has no I/O: roles, the tab id, the error model and the
//! resolved client configuration live here so that the session, clock and web
//! crates agree on them.

pub mod config;
pub mod error;
pub mod id;
pub mod role;

pub use config::{AppMode, ClientConfig, is_loopback_host};
pub use error::FrontdeskError;
pub use id::TabId;
pub use role::Role;
