//! Page configuration embedded by the templates.
//!
//! A page may carry `<script type="application/json" id="despair-config">`
//! with a partial [`BehaviorConfig`]. Anything missing or invalid falls back
//! to the defaults.

use despair_core::constants::CONFIG_SCRIPT_ID;
use despair_core::{BehaviorConfig, ConfigError};
use web_sys::Document;

/// Resolve the embedded text into a configuration, reporting why the
/// defaults were used if the text was rejected.
#[must_use]
pub fn resolve(embedded: Option<&str>) -> (BehaviorConfig, Option<ConfigError>) {
    match embedded.map(str::trim).filter(|text| !text.is_empty()) {
        None => (BehaviorConfig::default(), None),
        Some(text) => match BehaviorConfig::from_json(text) {
            Ok(config) => (config, None),
            Err(err) => (BehaviorConfig::default(), Some(err)),
        },
    }
}

/// Read the page's configuration block.
#[must_use]
pub fn load(doc: &Document) -> BehaviorConfig {
    let embedded = doc
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content());
    let (config, rejected) = resolve(embedded.as_deref());
    if let Some(err) = rejected {
        log::warn!("ignoring #{CONFIG_SCRIPT_ID}: {err}");
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_block_uses_defaults() {
        assert_eq!(resolve(None).0, BehaviorConfig::default());
        let (config, err) = resolve(Some("   \n"));
        assert_eq!(config, BehaviorConfig::default());
        assert!(err.is_none());
    }

    #[test]
    fn valid_block_overrides_fields() {
        let (config, err) = resolve(Some(r#"{"qty_max": 20, "log_level": "debug"}"#));
        assert!(err.is_none());
        assert_eq!(config.qty_max, 20);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn invalid_block_falls_back_with_reason() {
        let (config, err) = resolve(Some(r#"{"qty_min": 50, "qty_max": 10}"#));
        assert_eq!(config, BehaviorConfig::default());
        assert!(matches!(err, Some(ConfigError::QuantityBounds { .. })));
    }
}
