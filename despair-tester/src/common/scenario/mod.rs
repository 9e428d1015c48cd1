use anyhow::Result;
use thirtyfour::prelude::*;

use crate::browser::TestBridge;

pub mod basket;
pub mod checkout;
pub mod consent;
pub mod controls;
pub mod smoke;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    /// Site origin, e.g. `http://localhost:8000`.
    pub base_url: String,
    pub run: usize,
    pub bridge: TestBridge<'a>,
    pub verbose: bool,
}

impl ScenarioCtx<'_> {
    /// Absolute URL for `path` with the test bridge enabled.
    pub fn page_url(&self, path: &str) -> String {
        page_url(&self.base_url, path)
    }

    pub async fn open(&self, driver: &WebDriver, path: &str) -> Result<()> {
        driver.goto(&self.page_url(path)).await?;
        self.bridge.ensure_available().await?;
        if self.verbose {
            println!("  🌐 [run {}] Loaded {path}", self.run);
        }
        Ok(())
    }
}

pub fn page_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{base}/{path}{sep}test=1")
}

/// A pure check against `despair-core`, repeated per iteration.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: fn() -> Result<()>,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, check: fn() -> Result<()>) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Scenarios that have both a logic and a browser form
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "basket" | "basket-add" => Some(Box::new(basket::BasketScenario)),
        "checkout" | "delivery" => Some(Box::new(checkout::CheckoutScenario)),
        "cookie-consent" | "consent" => Some(Box::new(consent::ConsentScenario)),
        "quantity" | "stepper" => Some(Box::new(controls::QuantityScenario)),
        "stars" | "star-picker" => Some(Box::new(controls::StarScenario)),
        "password" | "password-toggle" => Some(Box::new(controls::PasswordScenario)),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Behaviour wiring smoke test"),
        ("basket", "AJAX add-to-basket flow"),
        ("checkout", "Delivery and payment option cards"),
        ("cookie-consent", "Cookie banner lifecycle"),
        ("quantity", "Quantity stepper bounds"),
        ("stars", "Star rating picker"),
        ("password", "Password visibility toggle"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, _) in list_scenarios() {
            assert!(get_scenario(key).is_some(), "{key} is listed but unknown");
        }
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn every_listed_scenario_has_a_logic_check() {
        for (key, _) in list_scenarios() {
            let scenario = get_scenario(key).unwrap();
            let logic = scenario.as_logic_scenario().expect("logic form");
            (logic.check)().unwrap_or_else(|err| panic!("{key}: {err:#}"));
        }
    }

    #[test]
    fn page_url_enables_bridge() {
        assert_eq!(
            page_url("http://localhost:8000/", "/menu/"),
            "http://localhost:8000/menu/?test=1"
        );
        assert_eq!(
            page_url("http://x", "search/?q=duck"),
            "http://x/search/?q=duck&test=1"
        );
    }
}
