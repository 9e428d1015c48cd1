//! Menu category tabs that follow the section in view.

use std::rc::Rc;

use despair_core::constants::{
    ACTIVE_CLASS, MENU_SECTION_ATTR, MENU_SECTION_SELECTOR, SECTION_LINK_ATTR,
    SECTION_LINK_SELECTOR, SECTION_ROOT_MARGIN,
};
use despair_core::{BehaviorConfig, SectionNav};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollToOptions,
};

use crate::dom;

pub struct SectionTargets {
    pub sections: Vec<Element>,
    pub links: Vec<Element>,
}

impl SectionTargets {
    #[must_use]
    pub fn find(doc: &Document) -> Option<Self> {
        let sections = dom::query_all(doc, MENU_SECTION_SELECTOR);
        let links = dom::query_all(doc, SECTION_LINK_SELECTOR);
        (!sections.is_empty() && !links.is_empty()).then_some(Self { sections, links })
    }
}

struct LinkBar {
    nav: SectionNav,
    links: Vec<Element>,
}

impl LinkBar {
    fn highlight(&self, slug: &str) {
        for (link, active) in self.links.iter().zip(self.nav.activate(slug)) {
            let _ = link.class_list().toggle_with_force(ACTIVE_CLASS, active);
        }
    }
}

/// Observe the menu sections and wire smooth scrolling on the links.
///
/// # Errors
/// Returns an error if the observer or a listener cannot be created.
pub fn attach(
    doc: &Document,
    targets: SectionTargets,
    config: &BehaviorConfig,
) -> Result<(), JsValue> {
    let slugs = targets
        .links
        .iter()
        .map(|link| link.get_attribute(SECTION_LINK_ATTR))
        .collect();
    let bar = Rc::new(LinkBar {
        nav: SectionNav::new(slugs, config.scroll_header_offset),
        links: targets.links,
    });

    let observed = Rc::clone(&bar);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                if let Some(slug) = entry.target().get_attribute(MENU_SECTION_ATTR) {
                    observed.highlight(&slug);
                }
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_root_margin(SECTION_ROOT_MARGIN);
    options.set_threshold(&JsValue::from_f64(0.0));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    for section in &targets.sections {
        observer.observe(section);
    }

    for (idx, link) in bar.links.iter().enumerate() {
        let Some(slug) = bar.nav.link_section(idx).map(str::to_string) else {
            continue;
        };
        let bar = Rc::clone(&bar);
        let doc = doc.clone();
        dom::listen(link, "click", move |event| {
            let selector = format!("[{MENU_SECTION_ATTR}=\"{slug}\"]");
            let (Some(target), Some(win)) = (dom::query(&doc, &selector), dom::window()) else {
                return;
            };
            event.prevent_default();
            let top = bar.nav.scroll_target(
                target.get_bounding_client_rect().top(),
                win.scroll_y().unwrap_or_default(),
            );
            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&options);
        })?;
    }
    Ok(())
}
