//! # client
//!
//! Leptos + WASM frontend for the product catalog.
//!
//! This crate contains pages, components, the session store and route guard,
//! network types, and the REST client for the catalog service. The `hydrate`
//! feature builds the browser bundle; `ssr` lets the host render the shell.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install the panic hook and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
