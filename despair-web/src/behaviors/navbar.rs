use despair_core::constants::NAV_ID;
use despair_core::{BehaviorConfig, nav_shadow};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom;

pub struct NavbarTargets {
    pub nav: Element,
}

impl NavbarTargets {
    #[must_use]
    pub fn find(doc: &Document) -> Option<Self> {
        doc.get_element_by_id(NAV_ID).map(|nav| Self { nav })
    }
}

/// Deepen the navbar shadow once the page scrolls past the threshold.
///
/// # Errors
/// Returns an error if no window is available or the listener cannot be registered.
pub fn attach(targets: NavbarTargets, config: &BehaviorConfig) -> Result<(), JsValue> {
    let win = dom::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let threshold = config.nav_shadow_threshold;
    let nav = targets.nav;
    let scroll_win = win.clone();
    dom::listen_passive(&win, "scroll", move |_| {
        let scroll_y = scroll_win.scroll_y().unwrap_or_default();
        dom::set_style(&nav, "box-shadow", nav_shadow(scroll_y, threshold));
    })
}
