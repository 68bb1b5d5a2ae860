//! # medtriage
//!
//! Leptos + WASM front-end for the medical-triage web application.
//!
//! This crate contains pages, components, application state, network types,
//! the REST layer, and the realtime socket client. The backend (REST + socket
//! server) is external; everything here is same-origin client plumbing.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point; mounts the application onto `<body>`.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
