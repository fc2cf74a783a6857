//! # viewer
//!
//! Leptos + WASM frontend for the document page viewer.
//!
//! Pages, components and view state live here; everything about annotations
//! that does not touch the DOM is delegated to the `overlay` crate through
//! [`util::overlay_bridge`]. Browser-only code is gated behind the `hydrate`
//! feature so the crate also builds and tests natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger unavailable: {err}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
