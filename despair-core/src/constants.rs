//! Centralized timings, bounds and DOM contract names for the site behaviours.
//!
//! The page templates own the markup; these names are the attributes and
//! identifiers the behaviours expect from it. Timings are the defaults used
//! by [`crate::config::BehaviorConfig`].

// Timings (milliseconds) ---------------------------------------------------
pub const ALERT_DISMISS_MS: u32 = 4_000;
pub const ANNOUNCEMENT_COLLAPSE_MS: u32 = 12_000;
pub const COOKIE_BANNER_DELAY_MS: u32 = 800;
pub const BASKET_ACK_MS: u32 = 1_400;
pub const BASKET_TIMEOUT_MS: u32 = 10_000;

// Quantity stepper ---------------------------------------------------------
pub const QTY_MIN: u32 = 1;
pub const QTY_MAX: u32 = 99;

// Scrolling ----------------------------------------------------------------
pub const SCROLL_HEADER_OFFSET: f64 = 90.0;
pub const NAV_SHADOW_THRESHOLD: f64 = 30.0;
pub const NAV_SHADOW: &str = "0 4px 24px rgba(0,0,0,0.6)";
pub const NAV_SHADOW_NONE: &str = "none";
pub const SECTION_ROOT_MARGIN: &str = "-20% 0px -60% 0px";

// Colours ------------------------------------------------------------------
pub const STAR_ACTIVE_COLOR: &str = "var(--gold)";
pub const STAR_MUTED_COLOR: &str = "#3a2a1a";
pub const BASKET_ACK_BACKGROUND: &str = "#27ae60";
pub const BASKET_ACK_ICON_HTML: &str = "<i class=\"fa-solid fa-check\"></i>";
pub const PASSWORD_REVEALED_COLOR: &str = "var(--gold)";
pub const PASSWORD_MASKED_COLOR: &str = "#8a7a6a";

// Persistence --------------------------------------------------------------
pub const CONSENT_STORAGE_KEY: &str = "despair.cookie-consent";
pub const CONSENT_ACCEPTED: &str = "accepted";
pub const CONSENT_DECLINED: &str = "declined";

// Network ------------------------------------------------------------------
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

// DOM contract -------------------------------------------------------------
pub const ACTIVE_CLASS: &str = "active";
pub const ALERT_SELECTOR: &str = ".alert.alert-dismissible";
pub const NAV_ID: &str = "main-nav";
pub const BASKET_FORM_SELECTOR: &str = "[data-ajax-basket]";
pub const SUBMIT_CONTROL_SELECTOR: &str = "[type=submit]";
pub const BADGE_SELECTOR: &str = ".basket-badge, #basket-count";
pub const QTY_BUTTON_SELECTOR: &str = ".qty-btn";
pub const QTY_ACTION_ATTR: &str = "data-action";
pub const QTY_INPUT_SELECTOR: &str = ".qty-input";
pub const STAR_LABEL_SELECTOR: &str = ".star-label";
pub const RATING_INPUT_ID: &str = "id_rating";
pub const MENU_SECTION_SELECTOR: &str = "[data-menu-section]";
pub const MENU_SECTION_ATTR: &str = "data-menu-section";
pub const SECTION_LINK_SELECTOR: &str = ".category-nav-link, .cat-tab-mobile";
pub const SECTION_LINK_ATTR: &str = "data-section";
pub const ANNOUNCEMENT_ID: &str = "site-announcement";
pub const ANNOUNCEMENT_CLOSE_ID: &str = "announcement-close";
pub const COOKIE_BANNER_ID: &str = "cookie-banner";
pub const COOKIE_ACCEPT_ID: &str = "cookie-accept";
pub const COOKIE_DECLINE_ID: &str = "cookie-decline";
pub const PASSWORD_SELECTOR: &str = "input[type=\"password\"]";
pub const CONFIG_SCRIPT_ID: &str = "despair-config";
