#![forbid(unsafe_code)]
//! Despair Chinese page behaviours for the browser.
//!
//! The module loads once per page, reads the optional embedded configuration
//! and wires every behaviour whose elements are present.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod behaviors;
pub mod bridge;
pub mod config;
pub mod dom;
pub mod logging;

pub use behaviors::{init_all, refresh_password_toggles};

/// Load configuration, wire the page and install the test bridge.
pub fn boot(doc: &web_sys::Document) -> despair_core::WiringReport {
    let config = config::load(doc);
    logging::init(config.level_filter().unwrap_or(log::LevelFilter::Warn));
    let report = init_all(doc, &config);
    bridge::install(report.clone(), &config);
    report
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Warn);
    let ready = dom::on_ready(|| match dom::document() {
        Some(doc) => {
            boot(&doc);
        }
        None => log::error!("document unavailable; page behaviours not wired"),
    });
    if let Err(err) = ready {
        log::error!("could not schedule page wiring: {}", dom::js_error_message(&err));
    }
}
