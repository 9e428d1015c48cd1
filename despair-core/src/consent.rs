//! Cookie-consent banner.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::convert::Infallible;

use serde::Serialize;

use crate::constants::{CONSENT_ACCEPTED, CONSENT_DECLINED};

/// The visitor's recorded choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentFlag {
    Unset,
    Accepted,
    Declined,
}

impl ConsentFlag {
    /// Interpret the stored string. Any non-empty value counts as a recorded
    /// choice; unrecognised ones are read as a decline.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::Unset,
            Some(CONSENT_ACCEPTED) => Self::Accepted,
            Some(_) => Self::Declined,
        }
    }

    #[must_use]
    pub const fn stored_value(self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Accepted => Some(CONSENT_ACCEPTED),
            Self::Declined => Some(CONSENT_DECLINED),
        }
    }

    #[must_use]
    pub const fn is_recorded(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// Trait for abstracting the per-browser key/value store.
/// Platform-specific implementations should provide this
pub trait ConsentStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// In-process store for tests and the logic tester.
#[derive(Debug, Default)]
pub struct MemoryConsentStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryConsentStore {
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl ConsentStore for MemoryConsentStore {
    type Error = Infallible;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// What the banner should do once the page has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPlan {
    ShowAfter { delay_ms: u32 },
    StayHidden,
}

/// Explicit choices the banner offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChoice {
    Accept,
    Decline,
}

impl From<ConsentChoice> for ConsentFlag {
    fn from(choice: ConsentChoice) -> Self {
        match choice {
            ConsentChoice::Accept => Self::Accepted,
            ConsentChoice::Decline => Self::Declined,
        }
    }
}

pub struct CookieConsent<S> {
    store: S,
    key: String,
    delay_ms: u32,
    chosen: Cell<Option<ConsentFlag>>,
}

impl<S: ConsentStore> CookieConsent<S> {
    pub fn new(store: S, key: impl Into<String>, delay_ms: u32) -> Self {
        Self {
            store,
            key: key.into(),
            delay_ms,
            chosen: Cell::new(None),
        }
    }

    /// Current flag.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it cannot be read.
    pub fn current(&self) -> Result<ConsentFlag, S::Error> {
        let stored = self.store.load(&self.key)?;
        Ok(ConsentFlag::from_stored(stored.as_deref()))
    }

    /// Decide at load whether the banner appears. An unreadable store is
    /// treated as "no choice recorded".
    pub fn plan(&self) -> BannerPlan {
        match self.current() {
            Ok(flag) if flag.is_recorded() => BannerPlan::StayHidden,
            Ok(_) => BannerPlan::ShowAfter {
                delay_ms: self.delay_ms,
            },
            Err(err) => {
                log::debug!("consent store unreadable, showing banner: {err}");
                BannerPlan::ShowAfter {
                    delay_ms: self.delay_ms,
                }
            }
        }
    }

    /// Persist an explicit choice. The banner hides whether or not this
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the value cannot be written.
    pub fn record(&self, choice: ConsentChoice) -> Result<ConsentFlag, S::Error> {
        let flag = ConsentFlag::from(choice);
        self.chosen.set(Some(flag));
        if let Some(value) = flag.stored_value() {
            self.store.save(&self.key, value)?;
        }
        Ok(flag)
    }

    /// Choice made through the banner during this page view, persisted or
    /// not. A pending show timer must not reveal the banner once this is set.
    #[must_use]
    pub fn chosen_this_visit(&self) -> Option<ConsentFlag> {
        self.chosen.get()
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}
