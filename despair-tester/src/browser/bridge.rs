//! Client for `window.__despairTest`, the page's test-mode hook.

use anyhow::{Context, Result};
use despair_core::{Behavior, ConsentFlag};
use serde::Deserialize;
use thirtyfour::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("__despairTest is not available. Did you pass ?test=1?")]
    Unavailable,
    #[error("bridge returned no value for {0}")]
    Empty(&'static str),
}

/// Which behaviours the page reports as wired.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeReport {
    pub wired: Vec<String>,
    pub skipped: Vec<String>,
}

impl BridgeReport {
    pub fn is_wired(&self, behavior: Behavior) -> bool {
        self.wired.iter().any(|name| name == behavior.name())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConsent {
    pub key: String,
    pub flag: String,
    pub recorded: bool,
}

impl BridgeConsent {
    pub fn flag(&self) -> ConsentFlag {
        match self.flag.as_str() {
            "unset" => ConsentFlag::Unset,
            stored => ConsentFlag::from_stored(Some(stored)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> TestBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__despairTest", vec![])
            .await?;
        if !result.json().as_bool().unwrap_or(false) {
            return Err(BridgeError::Unavailable.into());
        }
        Ok(())
    }

    pub async fn report(&self) -> Result<BridgeReport> {
        let result = self
            .driver
            .execute("return window.__despairTest.report()", vec![])
            .await?;
        let value = result.json().clone();
        if value.is_null() {
            return Err(BridgeError::Empty("report").into());
        }
        serde_json::from_value(value).context("parsing wiring report")
    }

    pub async fn consent(&self) -> Result<BridgeConsent> {
        let result = self
            .driver
            .execute("return window.__despairTest.consent()", vec![])
            .await?;
        serde_json::from_value(result.json().clone()).context("parsing consent state")
    }

    pub async fn refresh_passwords(&self) -> Result<u64> {
        let result = self
            .driver
            .execute("return window.__despairTest.refreshPasswords()", vec![])
            .await?;
        result
            .json()
            .as_u64()
            .ok_or_else(|| BridgeError::Empty("refreshPasswords").into())
    }

    /// Forget any stored cookie choice so the next load shows the banner.
    pub async fn clear_consent(&self, key: &str) -> Result<()> {
        self.driver
            .execute(
                "window.localStorage.removeItem(arguments[0])",
                vec![key.into()],
            )
            .await?;
        Ok(())
    }
}
