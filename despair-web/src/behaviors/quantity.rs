use despair_core::constants::{QTY_ACTION_ATTR, QTY_BUTTON_SELECTOR, QTY_INPUT_SELECTOR};
use despair_core::{BehaviorConfig, QuantityStepper, StepAction};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

use crate::dom;

pub struct QuantityTargets {
    pub input: HtmlInputElement,
    pub buttons: Vec<(Element, StepAction)>,
}

impl QuantityTargets {
    #[must_use]
    pub fn find(doc: &Document) -> Option<Self> {
        let input = dom::query(doc, QTY_INPUT_SELECTOR)?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        let buttons = dom::query_all(doc, QTY_BUTTON_SELECTOR)
            .into_iter()
            .filter_map(|button| {
                let raw = button.get_attribute(QTY_ACTION_ATTR).unwrap_or_default();
                match raw.parse::<StepAction>() {
                    Ok(action) => Some((button, action)),
                    Err(err) => {
                        log::debug!("ignoring quantity button: {err}");
                        None
                    }
                }
            })
            .collect();
        Some(Self { input, buttons })
    }
}

/// Wire the ± buttons to the quantity field.
///
/// # Errors
/// Returns an error if a click listener cannot be registered.
pub fn attach(targets: QuantityTargets, config: &BehaviorConfig) -> Result<(), JsValue> {
    let stepper = QuantityStepper::new(config.qty_min, config.qty_max);
    for (button, action) in targets.buttons {
        let input = targets.input.clone();
        dom::listen(&button, "click", move |_| {
            if let Some(next) = stepper.step(action, &input.value()) {
                input.set_value(&next.to_string());
            }
        })?;
    }
    Ok(())
}
