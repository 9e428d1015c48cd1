use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, NodeList,
    Storage, Window,
};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Collect a `NodeList` into elements, skipping non-element nodes.
#[must_use]
pub fn node_list_elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All elements in the document matching `selector`; empty on a bad selector.
#[must_use]
pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    doc.query_selector_all(selector)
        .map(|list| node_list_elements(&list))
        .unwrap_or_default()
}

/// All descendants of `root` matching `selector`; empty on a bad selector.
#[must_use]
pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| node_list_elements(&list))
        .unwrap_or_default()
}

/// First match for `selector` in the document.
#[must_use]
pub fn query(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

/// Set one inline style property; elements without a style object are ignored.
pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let style = html.style();
        let _ = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
    }
}

/// Attach `handler` to `target` for the lifetime of the page.
///
/// # Errors
/// Returns an error if the listener cannot be registered.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], registered as a passive listener.
///
/// # Errors
/// Returns an error if the listener cannot be registered.
pub fn listen_passive<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

/// Run `callback` once after `delay_ms`.
///
/// # Errors
/// Returns an error if no window is available or the timer cannot be scheduled.
pub fn set_timeout<F>(delay_ms: u32, callback: F) -> Result<i32, JsValue>
where
    F: FnOnce() + 'static,
{
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let closure = Closure::once_into_js(callback);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.unchecked_ref(),
        i32::try_from(delay_ms).unwrap_or(i32::MAX),
    )
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: u32) -> Result<(), JsValue> {
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    set_timeout(duration_ms, move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    })?;

    JsFuture::from(promise).await?;
    Ok(())
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Run `callback` once the document has been parsed.
///
/// # Errors
/// Returns an error if the document is unavailable or the listener cannot be registered.
pub fn on_ready<F>(callback: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let doc = document().ok_or_else(|| JsValue::from_str("document unavailable"))?;
    if doc.ready_state() == "loading" {
        let mut callback = Some(callback);
        listen(&doc, "DOMContentLoaded", move |_| {
            if let Some(callback) = callback.take() {
                callback();
            }
        })
    } else {
        callback();
        Ok(())
    }
}
