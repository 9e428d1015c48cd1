//! Quantity stepper, star picker and password toggle.

use anyhow::{Context, Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use despair_core::{
    InitRegistry, QuantityStepper, StarPicker, StarTone, StepAction, Visibility, claim_new,
};

pub struct QuantityScenario;
pub struct StarScenario;
pub struct PasswordScenario;

fn quantity_check() -> Result<()> {
    let stepper = QuantityStepper::new(1, 99);
    ensure!(stepper.step(StepAction::Plus, "99") == Some(99), "plus passed max");
    ensure!(stepper.step(StepAction::Minus, "1") == Some(1), "minus passed min");
    ensure!(stepper.step(StepAction::Plus, "4 pcs") == Some(5), "leading digits ignored");
    ensure!(stepper.step(StepAction::Minus, "lots").is_none(), "unparseable field changed");
    ensure!(stepper.step(StepAction::Minus, "150") == Some(149), "minus jumped an oversized value");
    Ok(())
}

fn star_check() -> Result<()> {
    let picker = StarPicker::new(5);
    let (rating, tones) = picker.click(1).context("click on second label ignored")?;
    ensure!(rating == 4, "second label should mean four stars, got {rating}");
    ensure!(
        tones.as_slice()
            == [
                StarTone::Muted,
                StarTone::Active,
                StarTone::Active,
                StarTone::Active,
                StarTone::Active
            ],
        "unexpected tones {tones:?}"
    );
    ensure!(
        picker.prefill("4").as_ref() == Some(&tones),
        "prefill differs from click colouring"
    );
    ensure!(picker.prefill("").is_none(), "empty rating painted stars");
    Ok(())
}

fn password_check() -> Result<()> {
    let shown = Visibility::Masked.toggled();
    ensure!(shown.input_type() == "text", "reveal kept the field masked");
    ensure!(shown.toggled() == Visibility::Masked, "toggle is not an involution");

    let mut registry = InitRegistry::default();
    let first = claim_new(&mut registry, ["login", "signup"]);
    let again = claim_new(&mut registry, ["login", "signup", "reset"]);
    ensure!(first.len() == 2 && again == ["reset"], "fields wrapped twice");
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for QuantityScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.open(driver, "/menu/item/1/").await?;
        let input = driver.find(By::Css(".qty-input")).await?;
        let minus = driver.find(By::Css(".qty-btn[data-action=\"minus\"]")).await?;
        let plus = driver.find(By::Css(".qty-btn[data-action=\"plus\"]")).await?;

        for _ in 0..3 {
            minus.click().await?;
        }
        let floor = input.prop("value").await?.unwrap_or_default();
        ensure!(floor == "1", "quantity went below 1: {floor}");

        plus.click().await?;
        let bumped = input.prop("value").await?.unwrap_or_default();
        ensure!(bumped == "2", "plus did not increment: {bumped}");
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserScenario for StarScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.open(driver, "/reviews/by-receipt/").await?;
        let labels = driver.find_all(By::Css(".star-label")).await?;
        ensure!(labels.len() == 5, "expected five star labels, got {}", labels.len());
        labels[0].click().await?;
        let rating = driver.find(By::Id("id_rating")).await?;
        let value = rating.prop("value").await?.unwrap_or_default();
        ensure!(value == "5", "first label should rate 5, got {value}");
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserScenario for PasswordScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.open(driver, "/accounts/login/").await?;
        let toggles = driver.find_all(By::Css(".password-toggle-btn")).await?;
        ensure!(!toggles.is_empty(), "no password toggle rendered");
        ensure!(
            ctx.bridge.refresh_passwords().await? == 0,
            "re-running the toggle wrapped a field twice"
        );

        toggles[0].click().await?;
        let field = driver.find(By::Css(".password-toggle-wrap input")).await?;
        let kind = field.attr("type").await?.unwrap_or_default();
        ensure!(kind == "text", "toggle did not reveal the password");
        Ok(())
    }
}

impl CombinedScenario for QuantityScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Quantity Stepper", quantity_check))
    }
}

impl CombinedScenario for StarScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Star Picker", star_check))
    }
}

impl CombinedScenario for PasswordScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Password Toggle", password_check))
    }
}
