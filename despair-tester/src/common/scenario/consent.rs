use anyhow::{Context, Result, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use despair_core::constants::{CONSENT_STORAGE_KEY, COOKIE_BANNER_DELAY_MS};
use despair_core::{BannerPlan, ConsentChoice, ConsentFlag, CookieConsent, MemoryConsentStore};

pub struct ConsentScenario;

fn consent_check() -> Result<()> {
    let consent = CookieConsent::new(
        MemoryConsentStore::default(),
        CONSENT_STORAGE_KEY,
        COOKIE_BANNER_DELAY_MS,
    );
    ensure!(
        consent.plan()
            == BannerPlan::ShowAfter {
                delay_ms: COOKIE_BANNER_DELAY_MS
            },
        "first visit should show the banner"
    );
    let recorded = consent.record(ConsentChoice::Accept)?;
    ensure!(recorded == ConsentFlag::Accepted, "accept recorded as {recorded:?}");
    ensure!(consent.plan() == BannerPlan::StayHidden, "banner returns after accept");

    let declined = CookieConsent::new(
        MemoryConsentStore::with_value(CONSENT_STORAGE_KEY, "declined"),
        CONSENT_STORAGE_KEY,
        COOKIE_BANNER_DELAY_MS,
    );
    ensure!(declined.plan() == BannerPlan::StayHidden, "decline not remembered");
    Ok(())
}

async fn banner_visible(driver: &WebDriver) -> Result<bool> {
    let banner = driver
        .find(By::Id("cookie-banner"))
        .await
        .context("page has no cookie banner")?;
    Ok(banner.is_displayed().await?)
}

#[async_trait::async_trait]
impl BrowserScenario for ConsentScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.open(driver, "/").await?;
        let key = ctx.bridge.consent().await?.key;
        ctx.bridge.clear_consent(&key).await?;

        ctx.open(driver, "/").await?;
        tokio::time::sleep(Duration::from_millis(u64::from(COOKIE_BANNER_DELAY_MS) + 400)).await;
        ensure!(banner_visible(driver).await?, "banner did not appear");

        driver.find(By::Id("cookie-accept")).await?.click().await?;
        ensure!(!banner_visible(driver).await?, "banner still visible after accept");
        let state = ctx.bridge.consent().await?;
        ensure!(
            state.recorded && state.flag() == ConsentFlag::Accepted,
            "consent not stored: {state:?}"
        );

        ctx.open(driver, "/").await?;
        tokio::time::sleep(Duration::from_millis(u64::from(COOKIE_BANNER_DELAY_MS) + 400)).await;
        ensure!(!banner_visible(driver).await?, "banner reappeared after reload");
        if ctx.verbose {
            println!("  🍪 Consent persisted under {key}");
        }
        Ok(())
    }
}

impl CombinedScenario for ConsentScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Cookie Consent", consent_check))
    }
}
