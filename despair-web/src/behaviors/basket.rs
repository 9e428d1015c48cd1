//! AJAX "add to basket" forms.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use despair_core::constants::{
    BADGE_SELECTOR, BASKET_FORM_SELECTOR, REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE,
    SUBMIT_CONTROL_SELECTOR,
};
use despair_core::{
    BadgeDisplay, BadgeSink, BasketAdded, BasketSubmission, BehaviorConfig, BehaviorError,
    Settlement, SubmitControl, interpret_response,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    AbortController, AbortSignal, Document, Element, FormData, Headers, HtmlFormElement, Request,
    RequestInit, Response,
};

use crate::dom;

/// The form's `[type=submit]` element.
#[derive(Debug, Clone)]
pub struct ButtonControl(pub Element);

impl SubmitControl for ButtonControl {
    fn set_disabled(&self, disabled: bool) {
        let _ = if disabled {
            self.0.set_attribute("disabled", "")
        } else {
            self.0.remove_attribute("disabled")
        };
    }

    fn content(&self) -> String {
        self.0.inner_html()
    }

    fn set_content(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn set_background(&self, color: &str) {
        dom::set_style(&self.0, "background", color);
    }
}

/// A `.basket-badge` or `#basket-count` element.
#[derive(Debug, Clone)]
pub struct BadgeElement(pub Element);

impl BadgeSink for BadgeElement {
    fn show(&self, display: &BadgeDisplay) {
        self.0.set_text_content(Some(&display.text));
        dom::set_style(&self.0, "display", display.css_display());
    }
}

pub struct BasketTargets {
    pub forms: Vec<HtmlFormElement>,
    pub badges: Vec<BadgeElement>,
}

impl BasketTargets {
    #[must_use]
    pub fn find(doc: &Document) -> Option<Self> {
        let forms: Vec<HtmlFormElement> = dom::query_all(doc, BASKET_FORM_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlFormElement>().ok())
            .collect();
        if forms.is_empty() {
            return None;
        }
        let badges = dom::query_all(doc, BADGE_SELECTOR)
            .into_iter()
            .map(BadgeElement)
            .collect();
        Some(Self { forms, badges })
    }
}

/// Intercept every basket form and submit it in the background.
///
/// # Errors
/// Returns an error if a submit listener cannot be registered.
pub fn attach(targets: BasketTargets, config: &BehaviorConfig) -> Result<(), JsValue> {
    let badges = Rc::new(targets.badges);
    let ack_ms = config.timings.basket_ack_ms;
    let timeout_ms = config.timings.basket_timeout_ms;

    for form in targets.forms {
        let control = form
            .query_selector(SUBMIT_CONTROL_SELECTOR)
            .ok()
            .flatten()
            .map(ButtonControl);
        let state = Rc::new(RefCell::new(BasketSubmission::new(control, ack_ms)));
        let badges = Rc::clone(&badges);
        let submitted = form.clone();
        dom::listen(&form, "submit", move |event| {
            event.prevent_default();
            if state.borrow_mut().begin() {
                log::debug!("basket form submitted again while a request is in flight");
                return;
            }
            spawn_local(submit(
                submitted.clone(),
                Rc::clone(&state),
                Rc::clone(&badges),
                timeout_ms,
            ));
        })?;
    }
    Ok(())
}

#[allow(clippy::future_not_send)]
async fn submit(
    form: HtmlFormElement,
    state: Rc<RefCell<BasketSubmission<ButtonControl>>>,
    badges: Rc<Vec<BadgeElement>>,
    timeout_ms: u32,
) {
    let outcome = post_form(&form, timeout_ms).await;
    match &outcome {
        Ok(added) => log::debug!(
            "basket now holds {} item(s){}",
            added.count,
            added
                .message
                .as_deref()
                .map(|m| format!(": {m}"))
                .unwrap_or_default()
        ),
        Err(err) => log::debug!("basket add failed: {err}"),
    }

    let settlement = state.borrow_mut().settle(&outcome, badges.as_slice());
    if let Settlement::Acknowledging { revert_after_ms } = settlement {
        if let Err(err) = dom::sleep_ms(revert_after_ms).await {
            log::debug!("acknowledgement timer failed: {}", dom::js_error_message(&err));
        }
        state.borrow_mut().finish_acknowledgement();
    }
}

fn transport(err: &JsValue) -> BehaviorError {
    BehaviorError::Transport(dom::js_error_message(err))
}

/// Build the background POST for `form`: its fields as the body, marked as
/// an XHR so the server answers with JSON.
///
/// # Errors
/// Returns [`BehaviorError::Transport`] if the browser refuses the request.
pub fn build_request(
    form: &HtmlFormElement,
    signal: Option<&AbortSignal>,
) -> Result<Request, BehaviorError> {
    let body = FormData::new_with_form(form).map_err(|e| transport(&e))?;
    let headers = Headers::new().map_err(|e| transport(&e))?;
    headers
        .set(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
        .map_err(|e| transport(&e))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&body);
    init.set_headers(&headers);
    init.set_signal(signal);
    Request::new_with_str_and_init(&form.action(), &init).map_err(|e| transport(&e))
}

/// POST the form's fields to its action and interpret the JSON reply.
///
/// The request is aborted after `timeout_ms`.
///
/// # Errors
/// Returns the [`BehaviorError`] describing why the add did not succeed.
#[allow(clippy::future_not_send)]
pub async fn post_form(
    form: &HtmlFormElement,
    timeout_ms: u32,
) -> Result<BasketAdded, BehaviorError> {
    let win = dom::window().ok_or_else(|| BehaviorError::Transport("window unavailable".into()))?;
    let controller = AbortController::new().map_err(|e| transport(&e))?;
    let request = build_request(form, Some(&controller.signal()))?;

    let timed_out = Rc::new(Cell::new(false));
    let timer = {
        let timed_out = Rc::clone(&timed_out);
        let controller = controller.clone();
        dom::set_timeout(timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
        .map_err(|e| transport(&e))?
    };

    let result = read_response(&win, &request).await;
    win.clear_timeout_with_handle(timer);

    match result {
        Ok((status, text)) => interpret_response(status, &text),
        Err(_) if timed_out.get() => Err(BehaviorError::TimedOut(timeout_ms)),
        Err(err) => Err(transport(&err)),
    }
}

#[allow(clippy::future_not_send)]
async fn read_response(win: &web_sys::Window, request: &Request) -> Result<(u16, String), JsValue> {
    let response: Response = JsFuture::from(win.fetch_with_request(request))
        .await?
        .dyn_into()?;
    let text = JsFuture::from(response.text()?).await?;
    let text = text
        .as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))?;
    Ok((response.status(), text))
}
