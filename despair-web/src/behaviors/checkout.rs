use std::rc::Rc;

use despair_core::constants::ACTIVE_CLASS;
use despair_core::{GroupSync, OptionGroup, OptionGroupKind};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::dom;

pub struct CheckoutTargets {
    pub kind: OptionGroupKind,
    pub cards: Vec<Element>,
    pub radios: Vec<HtmlInputElement>,
    pub block: Option<Element>,
}

impl CheckoutTargets {
    #[must_use]
    pub fn find(doc: &Document, kind: OptionGroupKind) -> Option<Self> {
        let cards = dom::query_all(doc, kind.card_selector());
        let radios: Vec<HtmlInputElement> = dom::query_all(doc, &kind.all_radios_selector())
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
            .collect();
        if cards.is_empty() && radios.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            cards,
            radios,
            block: doc.get_element_by_id(kind.dependent_block_id()),
        })
    }
}

struct GroupView {
    group: OptionGroup,
    cards: Vec<Element>,
    block: Option<Element>,
}

impl GroupView {
    fn apply(&self, value: &str) {
        self.render(&self.group.sync(value));
    }

    fn render(&self, sync: &GroupSync) {
        for (card, active) in self.cards.iter().zip(sync.active.iter()) {
            let _ = card
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, *active);
        }
        if let Some(block) = &self.block {
            dom::set_style(block, "display", sync.block_display());
        }
    }
}

fn find_radio(doc: &Document, kind: OptionGroupKind, value: &str) -> Option<HtmlInputElement> {
    kind.radio_id_for(value)
        .and_then(|id| doc.get_element_by_id(&id))
        .or_else(|| dom::query(doc, &kind.radio_selector_for(value)))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

/// Keep the cards, the radio group and the dependent block in step.
///
/// # Errors
/// Returns an error if a listener cannot be registered.
pub fn attach(doc: &Document, targets: CheckoutTargets) -> Result<(), JsValue> {
    let values = targets
        .cards
        .iter()
        .map(|card| card.get_attribute("data-value"))
        .collect();
    let view = Rc::new(GroupView {
        group: OptionGroup::new(targets.kind, values),
        cards: targets.cards,
        block: targets.block,
    });

    for (idx, card) in view.cards.iter().enumerate() {
        let Some(value) = view.group.card_value(idx).map(str::to_string) else {
            continue;
        };
        let view = Rc::clone(&view);
        let doc = doc.clone();
        dom::listen(card, "click", move |_| {
            if let Some(radio) = find_radio(&doc, view.group.kind(), &value) {
                radio.set_checked(true);
                if let Ok(change) = Event::new("change") {
                    let _ = radio.dispatch_event(&change);
                }
            }
            view.apply(&value);
        })?;
    }

    for radio in &targets.radios {
        let view = Rc::clone(&view);
        let source = radio.clone();
        dom::listen(radio, "change", move |_| view.apply(&source.value()))?;
    }

    let checked = targets.radios.iter().find(|r| r.checked()).map(HtmlInputElement::value);
    if let Some(sync) = view.group.initial(checked.as_deref()) {
        view.render(&sync);
    }
    Ok(())
}
