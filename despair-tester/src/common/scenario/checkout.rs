use anyhow::{Context, Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use despair_core::{OptionGroup, OptionGroupKind};

pub struct CheckoutScenario;

fn checkout_check() -> Result<()> {
    let delivery = OptionGroup::new(
        OptionGroupKind::Delivery,
        vec![Some("collection".to_string()), Some("delivery".to_string())],
    );
    let sync = delivery.sync("delivery");
    ensure!(
        sync.active.as_slice() == [false, true],
        "wrong active card {:?}",
        sync.active
    );
    ensure!(sync.block_display() == "block", "address block hidden");
    ensure!(
        delivery.sync("collection").block_display() == "none",
        "address block shown for collection"
    );

    let payment = OptionGroup::new(
        OptionGroupKind::Payment,
        vec![Some("card".to_string()), Some("cash".to_string())],
    );
    ensure!(payment.sync("card").block_visible, "card fields hidden");
    ensure!(
        payment.initial(None).is_none(),
        "no checked radio should leave the page untouched"
    );
    Ok(())
}

async fn display_of(driver: &WebDriver, id: &str) -> Result<String> {
    let block = driver
        .find(By::Id(id))
        .await
        .with_context(|| format!("#{id} missing"))?;
    Ok(block.css_value("display").await?)
}

#[async_trait::async_trait]
impl BrowserScenario for CheckoutScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.open(driver, "/orders/checkout/").await?;
        let kind = OptionGroupKind::Delivery;

        driver
            .find(By::Css(format!(
                "{}[data-value=\"{}\"]",
                kind.card_selector(),
                kind.revealing_value()
            )))
            .await?
            .click()
            .await?;
        let radio = driver
            .find(By::Css(kind.radio_selector_for(kind.revealing_value())))
            .await?;
        ensure!(radio.is_selected().await?, "delivery radio not checked");
        let shown = display_of(driver, kind.dependent_block_id()).await?;
        ensure!(shown != "none", "address block still hidden");

        driver
            .find(By::Css(format!(
                "{}[data-value=\"collection\"]",
                kind.card_selector()
            )))
            .await?
            .click()
            .await?;
        let hidden = display_of(driver, kind.dependent_block_id()).await?;
        ensure!(hidden == "none", "address block shown for collection");
        if ctx.verbose {
            println!("  📦 Delivery toggle verified");
        }
        Ok(())
    }
}

impl CombinedScenario for CheckoutScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Checkout Options", checkout_check))
    }
}
