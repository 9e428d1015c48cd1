//! Basket-add submission flow.
//!
//! The web layer owns the request; this module owns every decision around
//! it: what the response means, what the badges show, and what happens to
//! the submit control before, during and after the exchange.

use serde::Deserialize;

use crate::constants::{BASKET_ACK_BACKGROUND, BASKET_ACK_ICON_HTML};
use crate::error::BehaviorError;

/// Body of the basket-add endpoint's JSON reply.
///
/// The server names the count `basket_count`; `count` is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BasketResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "basket_count")]
    pub count: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A successful add, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketAdded {
    pub count: u32,
    pub message: Option<String>,
}

/// Turn an HTTP status and body into the outcome of the add.
///
/// # Errors
///
/// Returns [`BehaviorError::HttpStatus`] for non-2xx replies,
/// [`BehaviorError::Malformed`] when the body is not the expected JSON,
/// [`BehaviorError::Rejected`] for `success: false` and
/// [`BehaviorError::MissingCount`] when a success carries no count.
pub fn interpret_response(status: u16, body: &str) -> Result<BasketAdded, BehaviorError> {
    if !(200..300).contains(&status) {
        return Err(BehaviorError::HttpStatus(status));
    }
    let response: BasketResponse = serde_json::from_str(body)?;
    if !response.success {
        return Err(BehaviorError::Rejected(response.message));
    }
    let count = response.count.ok_or(BehaviorError::MissingCount)?;
    Ok(BasketAdded {
        count,
        message: response.message,
    })
}

/// What a single badge element should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeDisplay {
    pub text: String,
    pub visible: bool,
}

impl BadgeDisplay {
    #[must_use]
    pub fn for_count(count: u32) -> Self {
        Self {
            text: count.to_string(),
            visible: count > 0,
        }
    }

    /// CSS `display` value for the badge.
    #[must_use]
    pub const fn css_display(&self) -> &'static str {
        if self.visible { "flex" } else { "none" }
    }
}

/// The form's submit button, as far as the flow is concerned.
pub trait SubmitControl {
    fn set_disabled(&self, disabled: bool);
    fn content(&self) -> String;
    fn set_content(&self, html: &str);
    fn set_background(&self, color: &str);
}

/// One element displaying the basket count.
pub trait BadgeSink {
    fn show(&self, display: &BadgeDisplay);
}

/// Where the flow stands after the request settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Badges updated; the control shows the acknowledgement until
    /// [`BasketSubmission::finish_acknowledgement`] is called after the delay.
    Acknowledging { revert_after_ms: u32 },
    /// Request failed; the control is enabled again.
    Reenabled,
    /// Nothing left to do (badges may have been updated, but no control exists).
    Done,
}

/// Per-form state of the basket-add flow.
///
/// Each form gets its own instance, so forms never wait on each other. The
/// in-flight flag is the only duplicate guard.
#[derive(Debug)]
pub struct BasketSubmission<C> {
    control: Option<C>,
    in_flight: bool,
    original_content: Option<String>,
    ack_ms: u32,
}

impl<C: SubmitControl> BasketSubmission<C> {
    #[must_use]
    pub const fn new(control: Option<C>, ack_ms: u32) -> Self {
        Self {
            control,
            in_flight: false,
            original_content: None,
            ack_ms,
        }
    }

    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Mark the request as started and disable the control.
    ///
    /// Returns whether a request from this form was already in flight. In
    /// that case the caller drops the new submission and sends nothing.
    pub fn begin(&mut self) -> bool {
        let already = self.in_flight;
        self.in_flight = true;
        if let Some(control) = &self.control {
            control.set_disabled(true);
        }
        already
    }

    /// Apply the outcome of the request.
    pub fn settle<B: BadgeSink>(
        &mut self,
        outcome: &Result<BasketAdded, BehaviorError>,
        badges: &[B],
    ) -> Settlement {
        match outcome {
            Ok(added) => {
                let display = BadgeDisplay::for_count(added.count);
                for badge in badges {
                    badge.show(&display);
                }
                match &self.control {
                    Some(control) => {
                        self.original_content = Some(control.content());
                        control.set_content(BASKET_ACK_ICON_HTML);
                        control.set_background(BASKET_ACK_BACKGROUND);
                        Settlement::Acknowledging {
                            revert_after_ms: self.ack_ms,
                        }
                    }
                    None => {
                        self.in_flight = false;
                        Settlement::Done
                    }
                }
            }
            Err(_) => {
                self.in_flight = false;
                match &self.control {
                    Some(control) => {
                        control.set_disabled(false);
                        Settlement::Reenabled
                    }
                    None => Settlement::Done,
                }
            }
        }
    }

    /// Restore the control after the acknowledgement delay.
    pub fn finish_acknowledgement(&mut self) {
        if let Some(control) = &self.control {
            if let Some(original) = self.original_content.take() {
                control.set_content(&original);
            }
            control.set_background("");
            control.set_disabled(false);
        }
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    struct FakeControl {
        disabled: RefCell<bool>,
        html: RefCell<String>,
        background: RefCell<String>,
    }

    impl FakeControl {
        fn with_label(label: &str) -> Self {
            let control = Self::default();
            control.html.replace(label.to_string());
            control
        }
    }

    impl SubmitControl for &FakeControl {
        fn set_disabled(&self, disabled: bool) {
            self.disabled.replace(disabled);
        }
        fn content(&self) -> String {
            self.html.borrow().clone()
        }
        fn set_content(&self, html: &str) {
            self.html.replace(html.to_string());
        }
        fn set_background(&self, color: &str) {
            self.background.replace(color.to_string());
        }
    }

    #[derive(Debug, Default)]
    struct FakeBadge(RefCell<Option<BadgeDisplay>>);

    impl BadgeSink for FakeBadge {
        fn show(&self, display: &BadgeDisplay) {
            self.0.replace(Some(display.clone()));
        }
    }

    #[test]
    fn interpret_accepts_server_field_name() {
        let added =
            interpret_response(200, r#"{"success":true,"basket_count":4,"message":"Added"}"#)
                .unwrap();
        assert_eq!(added.count, 4);
        assert_eq!(added.message.as_deref(), Some("Added"));
    }

    #[test]
    fn interpret_rejects_bad_shapes() {
        assert!(matches!(
            interpret_response(500, "{}"),
            Err(BehaviorError::HttpStatus(500))
        ));
        assert!(matches!(
            interpret_response(200, "<html>"),
            Err(BehaviorError::Malformed(_))
        ));
        assert!(matches!(
            interpret_response(200, r#"{"success":false}"#),
            Err(BehaviorError::Rejected(None))
        ));
        assert!(matches!(
            interpret_response(200, r#"{"success":true}"#),
            Err(BehaviorError::MissingCount)
        ));
        assert!(matches!(
            interpret_response(200, r#"{"success":true,"count":-1}"#),
            Err(BehaviorError::Malformed(_))
        ));
    }

    #[test]
    fn success_acknowledges_then_restores() {
        let control = FakeControl::with_label("Add");
        let badges = [FakeBadge::default(), FakeBadge::default()];
        let mut flow = BasketSubmission::new(Some(&control), 1_400);

        assert!(!flow.begin());
        assert!(*control.disabled.borrow());

        let outcome = Ok(BasketAdded {
            count: 2,
            message: None,
        });
        let settlement = flow.settle(&outcome, &badges);
        assert_eq!(
            settlement,
            Settlement::Acknowledging {
                revert_after_ms: 1_400
            }
        );
        assert_eq!(*control.html.borrow(), BASKET_ACK_ICON_HTML);
        assert_eq!(*control.background.borrow(), BASKET_ACK_BACKGROUND);
        assert!(*control.disabled.borrow());
        assert!(flow.in_flight());

        flow.finish_acknowledgement();
        assert_eq!(*control.html.borrow(), "Add");
        assert_eq!(*control.background.borrow(), "");
        assert!(!*control.disabled.borrow());
        assert!(!flow.in_flight());
        for badge in &badges {
            assert_eq!(badge.0.borrow().as_ref().unwrap().text, "2");
        }
    }

    #[test]
    fn failure_reenables_without_touching_badges() {
        let control = FakeControl::with_label("Add");
        let badges = [FakeBadge::default()];
        let mut flow = BasketSubmission::new(Some(&control), 1_400);
        flow.begin();
        let settlement = flow.settle(&Err(BehaviorError::TimedOut(10_000)), &badges);
        assert_eq!(settlement, Settlement::Reenabled);
        assert!(!*control.disabled.borrow());
        assert_eq!(*control.html.borrow(), "Add");
        assert!(badges[0].0.borrow().is_none());
    }

    #[test]
    fn missing_control_still_updates_badges() {
        let badges = [FakeBadge::default()];
        let mut flow: BasketSubmission<&FakeControl> = BasketSubmission::new(None, 1_400);
        flow.begin();
        let outcome = Ok(BasketAdded {
            count: 0,
            message: None,
        });
        assert_eq!(flow.settle(&outcome, &badges), Settlement::Done);
        let shown = badges[0].0.borrow().clone().unwrap();
        assert!(!shown.visible);
        assert_eq!(shown.css_display(), "none");
        assert!(!flow.in_flight());
    }

    #[test]
    fn second_begin_reports_in_flight() {
        let control = FakeControl::with_label("Add");
        let mut flow = BasketSubmission::new(Some(&control), 1_400);
        assert!(!flow.begin());
        assert!(flow.begin());
    }
}
