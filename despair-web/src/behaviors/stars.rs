use std::rc::Rc;

use despair_core::constants::{RATING_INPUT_ID, STAR_LABEL_SELECTOR};
use despair_core::{BehaviorConfig, StarPicker, StarTone};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

use crate::dom;

pub struct StarTargets {
    pub labels: Vec<Element>,
    pub rating: Option<HtmlInputElement>,
}

impl StarTargets {
    #[must_use]
    pub fn find(doc: &Document) -> Option<Self> {
        let labels = dom::query_all(doc, STAR_LABEL_SELECTOR);
        if labels.is_empty() {
            return None;
        }
        let rating = doc
            .get_element_by_id(RATING_INPUT_ID)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        Some(Self { labels, rating })
    }
}

struct Painter {
    labels: Vec<Element>,
    config: BehaviorConfig,
}

impl Painter {
    fn paint(&self, tones: &[StarTone]) {
        for (label, tone) in self.labels.iter().zip(tones) {
            let Some(icon) = label.query_selector("i").ok().flatten() else {
                continue;
            };
            dom::set_style(&icon, "color", tone.color(&self.config));
        }
    }
}

/// Wire the star labels to the hidden rating field.
///
/// # Errors
/// Returns an error if a click listener cannot be registered.
pub fn attach(targets: StarTargets, config: &BehaviorConfig) -> Result<(), JsValue> {
    let picker = StarPicker::new(targets.labels.len());
    let painter = Rc::new(Painter {
        labels: targets.labels,
        config: config.clone(),
    });

    for (idx, label) in painter.labels.iter().enumerate() {
        let painter = Rc::clone(&painter);
        let rating = targets.rating.clone();
        dom::listen(label, "click", move |_| {
            let Some((value, tones)) = picker.click(idx) else {
                return;
            };
            if let Some(rating) = &rating {
                rating.set_value(&value.to_string());
            }
            painter.paint(&tones);
        })?;
    }

    if let Some(tones) = targets
        .rating
        .as_ref()
        .and_then(|rating| picker.prefill(&rating.value()))
    {
        painter.paint(&tones);
    }
    Ok(())
}
