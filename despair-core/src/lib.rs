//! Despair Chinese page behaviours
//!
//! Platform-agnostic decision logic for the ordering site's client-side
//! behaviours. This crate has no DOM dependency: each component receives the
//! elements it acts on through small capability traits, so the web front and
//! the tests can supply their own.

pub mod basket;
pub mod checkout;
pub mod config;
pub mod consent;
pub mod constants;
pub mod error;
pub mod notices;
pub mod password;
pub mod rating;
pub mod scroll;
pub mod stepper;

use serde::Serialize;

// Re-export commonly used types
pub use basket::{
    BadgeDisplay, BadgeSink, BasketAdded, BasketResponse, BasketSubmission, Settlement,
    SubmitControl, interpret_response,
};
pub use checkout::{GroupSync, OptionGroup, OptionGroupKind};
pub use config::{BehaviorConfig, Timings};
pub use consent::{
    BannerPlan, ConsentChoice, ConsentFlag, ConsentStore, CookieConsent, MemoryConsentStore,
};
pub use error::{BehaviorError, ConfigError};
pub use notices::{AlertDismissal, AnnouncementBanner, CollapseReason, DismissibleNotice};
pub use password::{InitPass, InitRegistry, InitTracker, Visibility, claim_new, init_each};
pub use rating::{StarPicker, StarTone, StarTones};
pub use scroll::{SectionNav, nav_shadow};
pub use stepper::{QuantityStepper, StepAction, parse_leading_int};

/// The independent behaviours a page can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Behavior {
    AlertDismiss,
    Announcement,
    CookieBanner,
    NavShadow,
    BasketAdd,
    DeliveryToggle,
    PaymentToggle,
    QuantityStepper,
    StarPicker,
    SectionSync,
    PasswordToggle,
}

impl Behavior {
    pub const ALL: [Self; 11] = [
        Self::AlertDismiss,
        Self::Announcement,
        Self::CookieBanner,
        Self::NavShadow,
        Self::BasketAdd,
        Self::DeliveryToggle,
        Self::PaymentToggle,
        Self::QuantityStepper,
        Self::StarPicker,
        Self::SectionSync,
        Self::PasswordToggle,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AlertDismiss => "alert-dismiss",
            Self::Announcement => "announcement",
            Self::CookieBanner => "cookie-banner",
            Self::NavShadow => "nav-shadow",
            Self::BasketAdd => "basket-add",
            Self::DeliveryToggle => "delivery-toggle",
            Self::PaymentToggle => "payment-toggle",
            Self::QuantityStepper => "quantity-stepper",
            Self::StarPicker => "star-picker",
            Self::SectionSync => "section-sync",
            Self::PasswordToggle => "password-toggle",
        }
    }
}

impl From<OptionGroupKind> for Behavior {
    fn from(kind: OptionGroupKind) -> Self {
        match kind {
            OptionGroupKind::Delivery => Self::DeliveryToggle,
            OptionGroupKind::Payment => Self::PaymentToggle,
        }
    }
}

/// Which behaviours initialisation wired on the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WiringReport {
    pub wired: Vec<Behavior>,
    pub skipped: Vec<Behavior>,
}

impl WiringReport {
    pub fn record(&mut self, behavior: Behavior, wired: bool) {
        if wired {
            log::trace!("wired {}", behavior.name());
            self.wired.push(behavior);
        } else {
            log::trace!("skipped {}: elements missing", behavior.name());
            self.skipped.push(behavior);
        }
    }

    #[must_use]
    pub fn is_wired(&self, behavior: Behavior) -> bool {
        self.wired.contains(&behavior)
    }
}
