use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::constants::{QTY_MAX, QTY_MIN};

static LEADING_INT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").ok());

/// Direction of a `.qty-btn` press, taken from its `data-action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Minus,
    Plus,
}

impl FromStr for StepAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minus" => Ok(Self::Minus),
            "plus" => Ok(Self::Plus),
            other => Err(format!("unknown step action `{other}`")),
        }
    }
}

/// Bounded integer control behind the item-detail quantity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    min: u32,
    max: u32,
}

impl Default for QuantityStepper {
    fn default() -> Self {
        Self::new(QTY_MIN, QTY_MAX)
    }
}

impl QuantityStepper {
    /// Bounds are normalised so that `1 <= min <= max`.
    #[must_use]
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.max(1);
        Self {
            min,
            max: max.max(min),
        }
    }

    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// One step down, never below `min`. Only the lower bound applies, so a
    /// typed value above `max` walks back one unit per press.
    #[must_use]
    pub fn decrement(&self, value: i64) -> i64 {
        value.saturating_sub(1).max(i64::from(self.min))
    }

    /// One step up, never above `max`.
    #[must_use]
    pub fn increment(&self, value: i64) -> i64 {
        value.saturating_add(1).min(i64::from(self.max))
    }

    /// Apply a button press to the field's current text.
    ///
    /// Returns `None` when the text has no leading integer; the press is a
    /// no-op in that case.
    #[must_use]
    pub fn step(&self, action: StepAction, current: &str) -> Option<i64> {
        let value = parse_leading_int(current)?;
        Some(match action {
            StepAction::Minus => self.decrement(value),
            StepAction::Plus => self.increment(value),
        })
    }
}

/// Read the integer prefix of a field value (`" 3 items"` is 3).
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    LEADING_INT
        .as_ref()?
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
