//! # journey-client
//!
//! Leptos + WASM frontend for Journey.
//!
//! This crate contains the route table, pages, the ambient auth state and
//! the login/sign-up flow, plus the REST helpers that reach the same-origin
//! auth API exposed by `journey-server`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: install the panic hook and logger, then hydrate.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        leptos::logging::warn!("console logger already initialized");
    }
    leptos::mount::hydrate_body(app::App);
}
