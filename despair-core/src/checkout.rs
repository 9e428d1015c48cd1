//! Checkout option cards kept in step with their radio group.

use smallvec::SmallVec;

/// The two card groups on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionGroupKind {
    Delivery,
    Payment,
}

impl OptionGroupKind {
    pub const ALL: [Self; 2] = [Self::Delivery, Self::Payment];

    #[must_use]
    pub const fn radio_name(self) -> &'static str {
        match self {
            Self::Delivery => "delivery_type",
            Self::Payment => "payment_method",
        }
    }

    #[must_use]
    pub const fn card_selector(self) -> &'static str {
        match self {
            Self::Delivery => ".delivery-option-card",
            Self::Payment => ".payment-option-card",
        }
    }

    #[must_use]
    pub const fn dependent_block_id(self) -> &'static str {
        match self {
            Self::Delivery => "address-block",
            Self::Payment => "card-fields-block",
        }
    }

    /// The one value that reveals the dependent block.
    #[must_use]
    pub const fn revealing_value(self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Payment => "card",
        }
    }

    /// Radio element id rendered by the checkout form, when it has one.
    #[must_use]
    pub fn radio_id_for(self, value: &str) -> Option<String> {
        match self {
            Self::Delivery => Some(format!("id_delivery_type_{value}")),
            Self::Payment => None,
        }
    }

    /// Selector for the radio carrying `value`.
    #[must_use]
    pub fn radio_selector_for(self, value: &str) -> String {
        format!(
            "input[name=\"{name}\"][value=\"{value}\"]",
            name = self.radio_name()
        )
    }

    #[must_use]
    pub fn all_radios_selector(self) -> String {
        format!("input[name=\"{}\"]", self.radio_name())
    }
}

/// Visual state for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSync {
    /// One flag per card, in the order the cards were registered.
    pub active: SmallVec<[bool; 4]>,
    pub block_visible: bool,
}

impl GroupSync {
    #[must_use]
    pub const fn block_display(&self) -> &'static str {
        if self.block_visible { "block" } else { "none" }
    }
}

/// A card group registered with the `data-value` of each card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    kind: OptionGroupKind,
    card_values: Vec<Option<String>>,
}

impl OptionGroup {
    #[must_use]
    pub const fn new(kind: OptionGroupKind, card_values: Vec<Option<String>>) -> Self {
        Self { kind, card_values }
    }

    #[must_use]
    pub const fn kind(&self) -> OptionGroupKind {
        self.kind
    }

    #[must_use]
    pub fn card_value(&self, idx: usize) -> Option<&str> {
        self.card_values.get(idx).and_then(|v| v.as_deref())
    }

    /// Visual state for `value`: cards carrying it are active, the block is
    /// shown only for the group's revealing value.
    #[must_use]
    pub fn sync(&self, value: &str) -> GroupSync {
        GroupSync {
            active: self
                .card_values
                .iter()
                .map(|v| v.as_deref() == Some(value))
                .collect(),
            block_visible: value == self.kind.revealing_value(),
        }
    }

    /// Visual state at load, from whichever radio is checked.
    #[must_use]
    pub fn initial(&self, checked: Option<&str>) -> Option<GroupSync> {
        checked.map(|value| self.sync(value))
    }
}
