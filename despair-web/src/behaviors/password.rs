use std::cell::RefCell;

use despair_core::constants::PASSWORD_SELECTOR;
use despair_core::{InitTracker, Visibility, init_each};
use js_sys::WeakSet;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

use crate::dom;

/// Tracks wrapped inputs by element identity without keeping them alive.
pub struct ElementRegistry(WeakSet);

impl Default for ElementRegistry {
    fn default() -> Self {
        Self(WeakSet::new())
    }
}

impl InitTracker<HtmlInputElement> for ElementRegistry {
    fn first_time(&mut self, key: &HtmlInputElement) -> bool {
        if self.0.has(key) {
            return false;
        }
        self.0.add(key);
        true
    }

    fn release(&mut self, key: &HtmlInputElement) {
        self.0.delete(key);
    }
}

thread_local! {
    static WRAPPED: RefCell<ElementRegistry> = RefCell::new(ElementRegistry::default());
}

pub struct PasswordTargets {
    pub inputs: Vec<HtmlInputElement>,
}

impl PasswordTargets {
    #[must_use]
    pub fn find(doc: &Document) -> Option<Self> {
        let inputs: Vec<HtmlInputElement> = dom::query_all(doc, PASSWORD_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
            .collect();
        (!inputs.is_empty()).then_some(Self { inputs })
    }
}

fn render_toggle(button: &Element, icon: &Element, visibility: Visibility) {
    icon.set_class_name(visibility.icon_class());
    dom::set_style(icon, "color", visibility.icon_color());
    let _ = button.set_attribute("aria-label", visibility.aria_label());
    let _ = button.set_attribute(
        "aria-pressed",
        if visibility == Visibility::Revealed { "true" } else { "false" },
    );
}

fn wrap(doc: &Document, input: &HtmlInputElement) -> Result<(), JsValue> {
    let parent = input
        .parent_node()
        .ok_or_else(|| JsValue::from_str("password input is detached"))?;
    let wrapper = doc.create_element("div")?;
    wrapper.set_class_name("password-toggle-wrap");
    dom::set_style(&wrapper, "position", "relative");
    parent.insert_before(&wrapper, Some(input))?;
    wrapper.append_child(input)?;

    let button = doc.create_element("button")?;
    button.set_attribute("type", "button")?;
    button.set_class_name("password-toggle-btn");
    let icon = doc.create_element("i")?;
    button.append_child(&icon)?;
    wrapper.append_child(&button)?;
    render_toggle(&button, &icon, Visibility::from_input_type(&input.type_()));

    let field = input.clone();
    let control = button.clone();
    dom::listen(&button, "click", move |event| {
        event.prevent_default();
        let next = Visibility::from_input_type(&field.type_()).toggled();
        field.set_type(next.input_type());
        render_toggle(&control, &icon, next);
    })
}

/// Wrap every password field not wrapped before with a show/hide toggle.
/// Returns how many fields were wrapped by this call.
///
/// A field that cannot be wrapped is logged and left unclaimed, so a later
/// refresh tries it again.
///
/// # Errors
/// Returns the first DOM error when no field could be wrapped at all.
pub fn attach(doc: &Document, targets: PasswordTargets) -> Result<usize, JsValue> {
    let pass = WRAPPED.with(|registry| {
        init_each(&mut *registry.borrow_mut(), targets.inputs, |input| {
            wrap(doc, input)
        })
    });
    for err in &pass.failures {
        log::warn!("password toggle not added: {}", dom::js_error_message(err));
    }
    match pass.failures.into_iter().next() {
        Some(err) if pass.applied == 0 => Err(err),
        _ => Ok(pass.applied),
    }
}
