//! `window.__despairTest`, installed only when the page URL carries `test=1`.
//!
//! The browser tester reads wiring and consent state through it instead of
//! scraping the DOM.

use despair_core::{BehaviorConfig, ConsentFlag, CookieConsent, WiringReport};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::behaviors::{self, cookie_banner::WebConsentStore};
use crate::dom;

#[derive(Serialize)]
struct BridgeConsent {
    key: String,
    flag: ConsentFlag,
    recorded: bool,
}

/// Whether `search` (a `location.search` string) asks for test mode.
#[must_use]
pub fn test_flag_set(search: &str) -> bool {
    web_sys::UrlSearchParams::new_with_str(search)
        .ok()
        .and_then(|params| params.get("test"))
        .is_some_and(|value| value == "1")
}

#[must_use]
pub fn test_mode_enabled() -> bool {
    dom::window()
        .and_then(|win| win.location().search().ok())
        .is_some_and(|search| test_flag_set(&search))
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn set_fn(bridge: &js_sys::Object, name: &str, func: &JsValue) {
    let _ = js_sys::Reflect::set(bridge, &JsValue::from_str(name), func);
}

/// Expose `report()`, `consent()` and `refreshPasswords()` on the window.
pub fn install(report: WiringReport, config: &BehaviorConfig) {
    if !test_mode_enabled() {
        return;
    }
    let Some(window) = dom::window() else {
        return;
    };
    let bridge = js_sys::Object::new();

    let report_fn = Closure::<dyn FnMut() -> JsValue>::new(move || to_js(&report));
    set_fn(&bridge, "report", report_fn.as_ref().unchecked_ref());
    report_fn.forget();

    let key = config.consent_storage_key.clone();
    let delay = config.timings.cookie_banner_delay_ms;
    let consent = Closure::<dyn FnMut() -> JsValue>::new(move || {
        let consent = CookieConsent::new(WebConsentStore, key.clone(), delay);
        let flag = consent.current().unwrap_or(ConsentFlag::Unset);
        to_js(&BridgeConsent {
            key: key.clone(),
            flag,
            recorded: flag.is_recorded(),
        })
    });
    set_fn(&bridge, "consent", consent.as_ref().unchecked_ref());
    consent.forget();

    let refresh = Closure::<dyn FnMut() -> JsValue>::new(move || {
        let wrapped = dom::document()
            .map(|doc| behaviors::refresh_password_toggles(&doc))
            .transpose()
            .ok()
            .flatten()
            .unwrap_or(0);
        JsValue::from(u32::try_from(wrapped).unwrap_or(u32::MAX))
    });
    set_fn(&bridge, "refreshPasswords", refresh.as_ref().unchecked_ref());
    refresh.forget();

    let _ = js_sys::Reflect::set(&window, &JsValue::from_str("__despairTest"), &bridge);
}
