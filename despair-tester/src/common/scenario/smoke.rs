use anyhow::{Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use despair_core::{Behavior, BehaviorConfig, WiringReport};

pub struct SmokeScenario;

fn smoke_check() -> Result<()> {
    BehaviorConfig::default().validate()?;
    let overridden = BehaviorConfig::from_json(r#"{"qty_max": 12, "log_level": "debug"}"#)?;
    ensure!(overridden.qty_max == 12, "config override ignored");
    ensure!(
        BehaviorConfig::from_json(r#"{"qty_min": 0}"#).is_err(),
        "zero minimum quantity accepted"
    );

    let mut report = WiringReport::default();
    for behavior in Behavior::ALL {
        report.record(behavior, behavior != Behavior::PasswordToggle);
    }
    ensure!(
        report.wired.len() + report.skipped.len() == Behavior::ALL.len(),
        "wiring report lost a behaviour"
    );
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.open(driver, "/").await?;
        let report = ctx.bridge.report().await?;
        if ctx.verbose {
            println!("  📊 Wired: {:?}", report.wired);
        }
        ensure!(
            report.wired.len() + report.skipped.len() == Behavior::ALL.len(),
            "every behaviour should be reported once, got {report:?}"
        );
        ensure!(
            report.is_wired(Behavior::NavShadow),
            "home page should wire the navbar shadow"
        );
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Smoke", smoke_check))
    }
}
