use std::rc::Rc;

use despair_core::constants::{COOKIE_ACCEPT_ID, COOKIE_BANNER_ID, COOKIE_DECLINE_ID};
use despair_core::{BannerPlan, BehaviorConfig, ConsentChoice, ConsentStore, CookieConsent};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom;

/// Consent storage backed by `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebConsentStore;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WebStorageError {
    fn from_js(value: &JsValue) -> Self {
        Self::Storage(dom::js_error_message(value))
    }
}

impl ConsentStore for WebConsentStore {
    type Error = WebStorageError;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let storage = dom::local_storage().map_err(|e| WebStorageError::from_js(&e))?;
        storage.get_item(key).map_err(|e| WebStorageError::from_js(&e))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let storage = dom::local_storage().map_err(|e| WebStorageError::from_js(&e))?;
        storage
            .set_item(key, value)
            .map_err(|e| WebStorageError::from_js(&e))
    }
}

pub struct CookieBannerTargets {
    pub banner: Element,
    pub accept: Option<Element>,
    pub decline: Option<Element>,
}

impl CookieBannerTargets {
    #[must_use]
    pub fn find(doc: &Document) -> Option<Self> {
        Some(Self {
            banner: doc.get_element_by_id(COOKIE_BANNER_ID)?,
            accept: doc.get_element_by_id(COOKIE_ACCEPT_ID),
            decline: doc.get_element_by_id(COOKIE_DECLINE_ID),
        })
    }
}

fn set_visible(banner: &Element, visible: bool) {
    dom::set_style(banner, "display", if visible { "block" } else { "none" });
    let classes = banner.class_list();
    let _ = if visible {
        classes.add_1("show")
    } else {
        classes.remove_1("show")
    };
}

/// Show the banner after its delay unless a choice is already stored, and
/// persist whichever button the visitor presses.
///
/// # Errors
/// Returns an error if the timer or a click listener cannot be registered.
pub fn attach<S>(
    targets: CookieBannerTargets,
    store: S,
    config: &BehaviorConfig,
) -> Result<(), JsValue>
where
    S: ConsentStore + 'static,
{
    let consent = Rc::new(CookieConsent::new(
        store,
        config.consent_storage_key.clone(),
        config.timings.cookie_banner_delay_ms,
    ));

    match consent.plan() {
        BannerPlan::StayHidden => {
            set_visible(&targets.banner, false);
            return Ok(());
        }
        BannerPlan::ShowAfter { delay_ms } => {
            let consent = Rc::clone(&consent);
            let banner = targets.banner.clone();
            dom::set_timeout(delay_ms, move || {
                if consent.chosen_this_visit().is_none() {
                    set_visible(&banner, true);
                }
            })?;
        }
    }

    for (button, choice) in [
        (targets.accept, ConsentChoice::Accept),
        (targets.decline, ConsentChoice::Decline),
    ] {
        let Some(button) = button else {
            continue;
        };
        let consent = Rc::clone(&consent);
        let banner = targets.banner.clone();
        dom::listen(&button, "click", move |event| {
            event.prevent_default();
            match consent.record(choice) {
                Ok(flag) => log::debug!("cookie consent recorded: {flag:?}"),
                Err(err) => log::warn!("cookie consent not persisted: {err}"),
            }
            set_visible(&banner, false);
        })?;
    }
    Ok(())
}
