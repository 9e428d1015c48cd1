use std::cell::RefCell;
use std::rc::Rc;

use despair_core::constants::{ANNOUNCEMENT_CLOSE_ID, ANNOUNCEMENT_ID};
use despair_core::notices::COLLAPSE_STYLES;
use despair_core::{AnnouncementBanner, BehaviorConfig, CollapseReason};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom;

pub struct AnnouncementTargets {
    pub banner: Element,
    pub close: Option<Element>,
}

impl AnnouncementTargets {
    #[must_use]
    pub fn find(doc: &Document) -> Option<Self> {
        Some(Self {
            banner: doc.get_element_by_id(ANNOUNCEMENT_ID)?,
            close: doc.get_element_by_id(ANNOUNCEMENT_CLOSE_ID),
        })
    }
}

fn collapse(state: &RefCell<AnnouncementBanner>, banner: &Element, reason: CollapseReason) {
    if !state.borrow_mut().collapse(reason) {
        log::trace!(
            "announcement already collapsed by {:?}",
            state.borrow().collapsed_by()
        );
        return;
    }
    log::debug!("announcement collapsed by {reason:?}");
    for (property, value) in COLLAPSE_STYLES {
        dom::set_style(banner, property, value);
    }
    let _ = banner.set_attribute("aria-hidden", "true");
}

/// Collapse the banner after the configured delay or on close.
///
/// # Errors
/// Returns an error if the timer or the close listener cannot be registered.
pub fn attach(targets: AnnouncementTargets, config: &BehaviorConfig) -> Result<(), JsValue> {
    let state = Rc::new(RefCell::new(AnnouncementBanner::default()));

    {
        let state = Rc::clone(&state);
        let banner = targets.banner.clone();
        dom::set_timeout(config.timings.announcement_collapse_ms, move || {
            collapse(&state, &banner, CollapseReason::Timer);
        })?;
    }

    if let Some(close) = targets.close {
        let banner = targets.banner;
        dom::listen(&close, "click", move |event| {
            event.prevent_default();
            collapse(&state, &banner, CollapseReason::CloseClicked);
        })?;
    }
    Ok(())
}
