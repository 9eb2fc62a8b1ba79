//! Leptos shell for the browser build.

pub mod app;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;
use wasm_bindgen::prelude::*;

use crate::boot::boot_http;
use crate::browser::{BrowserSessionStorage, config_from_build_env};

/// WASM entry point.
///
/// Mounting waits for the clock sync to finish or fail, so no view ever reads
/// an un-attempted offset.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    wasm_bindgen_futures::spawn_local(async {
        let ctx = boot_http(config_from_build_env(), BrowserSessionStorage).await;
        let shared: app::SharedContext = Rc::new(RefCell::new(ctx));
        mount_to_body(move || view! { <app::App ctx=shared/> });
    });
}
