use serde::{Deserialize, Serialize};

use crate::constants::{
    ALERT_DISMISS_MS, ANNOUNCEMENT_COLLAPSE_MS, BASKET_ACK_MS, BASKET_TIMEOUT_MS,
    CONSENT_STORAGE_KEY, COOKIE_BANNER_DELAY_MS, NAV_SHADOW_THRESHOLD, QTY_MAX, QTY_MIN,
    SCROLL_HEADER_OFFSET, STAR_ACTIVE_COLOR, STAR_MUTED_COLOR,
};
use crate::error::ConfigError;

/// Delays applied by the timed behaviours, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub alert_dismiss_ms: u32,
    pub announcement_collapse_ms: u32,
    pub cookie_banner_delay_ms: u32,
    pub basket_ack_ms: u32,
    pub basket_timeout_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            alert_dismiss_ms: ALERT_DISMISS_MS,
            announcement_collapse_ms: ANNOUNCEMENT_COLLAPSE_MS,
            cookie_banner_delay_ms: COOKIE_BANNER_DELAY_MS,
            basket_ack_ms: BASKET_ACK_MS,
            basket_timeout_ms: BASKET_TIMEOUT_MS,
        }
    }
}

/// Page-level tuning for every behaviour.
///
/// Every field has a default, so a page may embed a partial JSON object
/// (or none at all).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub timings: Timings,
    pub qty_min: u32,
    pub qty_max: u32,
    pub scroll_header_offset: f64,
    pub nav_shadow_threshold: f64,
    pub star_active_color: String,
    pub star_muted_color: String,
    pub consent_storage_key: String,
    pub log_level: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            qty_min: QTY_MIN,
            qty_max: QTY_MAX,
            scroll_header_offset: SCROLL_HEADER_OFFSET,
            nav_shadow_threshold: NAV_SHADOW_THRESHOLD,
            star_active_color: STAR_ACTIVE_COLOR.to_string(),
            star_muted_color: STAR_MUTED_COLOR.to_string(),
            consent_storage_key: CONSENT_STORAGE_KEY.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl BehaviorConfig {
    /// Parse and validate a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a value fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.qty_min < 1 || self.qty_min > self.qty_max {
            return Err(ConfigError::QuantityBounds {
                min: self.qty_min,
                max: self.qty_max,
            });
        }
        let t = &self.timings;
        for (name, value) in [
            ("alert_dismiss_ms", t.alert_dismiss_ms),
            ("announcement_collapse_ms", t.announcement_collapse_ms),
            ("basket_ack_ms", t.basket_ack_ms),
            ("basket_timeout_ms", t.basket_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroTiming(name));
            }
        }
        if self.consent_storage_key.trim().is_empty() {
            return Err(ConfigError::Empty("consent_storage_key"));
        }
        if self.star_active_color.is_empty() || self.star_muted_color.is_empty() {
            return Err(ConfigError::Empty("star colours"));
        }
        self.level_filter()?;
        Ok(())
    }

    /// Resolve `log_level` into a `log` filter.
    ///
    /// # Errors
    ///
    /// Returns an error for names `log` does not recognise.
    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level
            .parse::<log::LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = BehaviorConfig::from_json("{}").unwrap();
        assert_eq!(config, BehaviorConfig::default());
        assert_eq!(config.timings.basket_ack_ms, 1_400);
        assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Warn);
    }

    #[test]
    fn partial_timings_keep_remaining_defaults() {
        let config =
            BehaviorConfig::from_json(r#"{"timings":{"basket_timeout_ms":2500}}"#).unwrap();
        assert_eq!(config.timings.basket_timeout_ms, 2_500);
        assert_eq!(config.timings.cookie_banner_delay_ms, 800);
    }

    #[test]
    fn inverted_quantity_bounds_are_rejected() {
        let err = BehaviorConfig::from_json(r#"{"qty_min":10,"qty_max":5}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::QuantityBounds { min: 10, max: 5 }
        ));
        let err = BehaviorConfig::from_json(r#"{"qty_min":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::QuantityBounds { .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err =
            BehaviorConfig::from_json(r#"{"timings":{"basket_timeout_ms":0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTiming("basket_timeout_ms")));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = BehaviorConfig::from_json(r#"{"log_level":"chatty"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::LogLevel(level) if level == "chatty"));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        assert!(matches!(
            BehaviorConfig::from_json("{nope").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
