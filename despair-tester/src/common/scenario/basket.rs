use anyhow::{Context, Result, bail, ensure};
use std::cell::{Cell, RefCell};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use despair_core::{
    BadgeDisplay, BadgeSink, BasketSubmission, BehaviorError, Settlement, SubmitControl,
    interpret_response,
};

pub struct BasketScenario;

#[derive(Default)]
struct RecordingButton {
    disabled: Cell<bool>,
    content: RefCell<String>,
    background: RefCell<String>,
}

impl SubmitControl for &RecordingButton {
    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    fn content(&self) -> String {
        self.content.borrow().clone()
    }

    fn set_content(&self, html: &str) {
        *self.content.borrow_mut() = html.to_string();
    }

    fn set_background(&self, color: &str) {
        *self.background.borrow_mut() = color.to_string();
    }
}

#[derive(Default)]
struct RecordingBadge(RefCell<Option<BadgeDisplay>>);

impl BadgeSink for RecordingBadge {
    fn show(&self, display: &BadgeDisplay) {
        *self.0.borrow_mut() = Some(display.clone());
    }
}

fn basket_check() -> Result<()> {
    let added = interpret_response(200, r#"{"success": true, "basket_count": 3}"#)?;
    ensure!(added.count == 3, "basket_count alias not honoured");
    ensure!(
        matches!(
            interpret_response(500, "oops"),
            Err(BehaviorError::HttpStatus(500))
        ),
        "server error should surface its status"
    );
    ensure!(
        matches!(
            interpret_response(200, r#"{"success": false, "message": "sold out"}"#),
            Err(BehaviorError::Rejected(Some(_)))
        ),
        "rejection message lost"
    );

    let button = RecordingButton {
        content: RefCell::new("Add".to_string()),
        ..RecordingButton::default()
    };
    let badges = [RecordingBadge::default(), RecordingBadge::default()];
    let mut submission = BasketSubmission::new(Some(&button), 1_400);

    ensure!(!submission.begin(), "fresh submission reported as in flight");
    ensure!(button.disabled.get(), "button not disabled while in flight");
    ensure!(submission.begin(), "double submit not detected");

    let settled = submission.settle(&Ok(added), &badges);
    ensure!(
        settled == Settlement::Acknowledging {
            revert_after_ms: 1_400
        },
        "unexpected settlement {settled:?}"
    );
    for badge in &badges {
        let shown = badge.0.borrow().clone().context("badge not updated")?;
        ensure!(shown.text == "3" && shown.visible, "badge shows {shown:?}");
    }
    submission.finish_acknowledgement();
    ensure!(*button.content.borrow() == "Add", "button label not restored");
    ensure!(
        !button.disabled.get() && !submission.in_flight(),
        "submission not released after acknowledgement"
    );

    let _ = submission.begin();
    let failed = submission.settle(&Err(BehaviorError::TimedOut(10_000)), &badges);
    ensure!(failed == Settlement::Reenabled, "failure left button disabled");
    ensure!(!button.disabled.get(), "failure left button disabled");
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for BasketScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.open(driver, "/menu/").await?;
        let submit = driver
            .find(By::Css("[data-ajax-basket] [type=submit]"))
            .await
            .context("menu page has no AJAX basket form")?;
        submit.click().await?;

        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(250)).await;
            let badge = driver.find(By::Css(".basket-badge, #basket-count")).await?;
            let text = badge.text().await?;
            if text.trim().parse::<u32>().is_ok_and(|count| count > 0) {
                if ctx.verbose {
                    println!("  🛒 Badge now shows {text}");
                }
                return Ok(());
            }
        }
        bail!("basket badge never showed a positive count")
    }
}

impl CombinedScenario for BasketScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Basket Add", basket_check))
    }
}
