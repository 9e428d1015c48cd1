use despair_core::constants::ALERT_SELECTOR;
use despair_core::{AlertDismissal, BehaviorConfig, DismissibleNotice};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::dom;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["bootstrap", "Alert"], js_name = getOrCreateInstance, catch)]
    fn bootstrap_alert(element: &Element) -> Result<JsValue, JsValue>;
}

/// A `.alert-dismissible` closed through Bootstrap's alert plugin, or
/// removed directly when the plugin is not loaded.
pub struct BootstrapAlert(Element);

impl BootstrapAlert {
    fn close_via_plugin(&self) -> Result<(), JsValue> {
        let instance = bootstrap_alert(&self.0)?;
        let close = js_sys::Reflect::get(&instance, &JsValue::from_str("close"))?
            .dyn_into::<js_sys::Function>()?;
        close.call0(&instance)?;
        Ok(())
    }
}

impl DismissibleNotice for BootstrapAlert {
    fn close(&self) {
        if let Err(err) = self.close_via_plugin() {
            log::trace!("alert plugin unavailable: {}", dom::js_error_message(&err));
            let _ = self.0.class_list().remove_1("show");
            self.0.remove();
        }
    }
}

pub struct AlertTargets {
    pub alerts: Vec<Element>,
}

impl AlertTargets {
    #[must_use]
    pub fn find(doc: &Document) -> Option<Self> {
        let alerts = dom::query_all(doc, ALERT_SELECTOR);
        (!alerts.is_empty()).then_some(Self { alerts })
    }
}

/// Schedule every alert to close after the configured delay.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled.
pub fn attach(targets: AlertTargets, config: &BehaviorConfig) -> Result<(), JsValue> {
    let notices: Vec<BootstrapAlert> = targets.alerts.into_iter().map(BootstrapAlert).collect();
    let dismissal = AlertDismissal::new(notices, config.timings.alert_dismiss_ms);
    dom::set_timeout(dismissal.delay_ms(), move || dismissal.fire())?;
    Ok(())
}
