//! DOM wiring for each page behaviour.
//!
//! Every module exposes a `*Targets::find` that looks up the elements it
//! needs and an `attach` that registers listeners. A page that lacks the
//! elements simply skips that behaviour.

pub mod alerts;
pub mod announcement;
pub mod basket;
pub mod checkout;
pub mod cookie_banner;
pub mod navbar;
pub mod password;
pub mod quantity;
pub mod scroll_sync;
pub mod stars;

use despair_core::{Behavior, BehaviorConfig, OptionGroupKind, WiringReport};
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::dom;

fn wire<T>(
    report: &mut WiringReport,
    behavior: Behavior,
    targets: Option<T>,
    attach: impl FnOnce(T) -> Result<(), JsValue>,
) {
    let Some(targets) = targets else {
        report.record(behavior, false);
        return;
    };
    match attach(targets) {
        Ok(()) => report.record(behavior, true),
        Err(err) => {
            log::warn!(
                "{} not wired: {}",
                behavior.name(),
                dom::js_error_message(&err)
            );
            report.record(behavior, false);
        }
    }
}

/// Wire every behaviour whose elements exist on `doc`.
pub fn init_all(doc: &Document, config: &BehaviorConfig) -> WiringReport {
    let mut report = WiringReport::default();

    wire(
        &mut report,
        Behavior::AlertDismiss,
        alerts::AlertTargets::find(doc),
        |t| alerts::attach(t, config),
    );
    wire(
        &mut report,
        Behavior::Announcement,
        announcement::AnnouncementTargets::find(doc),
        |t| announcement::attach(t, config),
    );
    wire(
        &mut report,
        Behavior::CookieBanner,
        cookie_banner::CookieBannerTargets::find(doc),
        |t| cookie_banner::attach(t, cookie_banner::WebConsentStore, config),
    );
    wire(
        &mut report,
        Behavior::NavShadow,
        navbar::NavbarTargets::find(doc),
        |t| navbar::attach(t, config),
    );
    wire(
        &mut report,
        Behavior::BasketAdd,
        basket::BasketTargets::find(doc),
        |t| basket::attach(t, config),
    );
    for kind in OptionGroupKind::ALL {
        wire(
            &mut report,
            kind.into(),
            checkout::CheckoutTargets::find(doc, kind),
            |t| checkout::attach(doc, t),
        );
    }
    wire(
        &mut report,
        Behavior::QuantityStepper,
        quantity::QuantityTargets::find(doc),
        |t| quantity::attach(t, config),
    );
    wire(
        &mut report,
        Behavior::StarPicker,
        stars::StarTargets::find(doc),
        |t| stars::attach(t, config),
    );
    wire(
        &mut report,
        Behavior::SectionSync,
        scroll_sync::SectionTargets::find(doc),
        |t| scroll_sync::attach(doc, t, config),
    );
    wire(
        &mut report,
        Behavior::PasswordToggle,
        password::PasswordTargets::find(doc),
        |t| password::attach(doc, t).map(|count| log::debug!("wrapped {count} password fields")),
    );

    log::info!(
        "page behaviours: {} wired, {} skipped",
        report.wired.len(),
        report.skipped.len()
    );
    report
}

/// Wrap password fields added after the initial wiring. Fields already
/// wrapped are left alone.
///
/// # Errors
/// Returns an error if wrapping a field fails.
pub fn refresh_password_toggles(doc: &Document) -> Result<usize, JsValue> {
    password::PasswordTargets::find(doc).map_or(Ok(0), |targets| password::attach(doc, targets))
}
