//! `frontdesk-web`
//!
//! **Responsibility:** per-tab wiring of the session guard and the corrected
//! clock, plus the browser shell that hosts them.
//!
//! This crate provides:
//! - `TabContext`: one session store, one clock, one guard per tab
//! - `boot`: clock sync first, then a ready context (mount waits on it)
//! - the `sessionStorage` binding and Leptos shell (wasm32 only)

pub mod boot;
pub mod context;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use boot::{boot, boot_http};
pub use context::{Navigation, TabContext};
