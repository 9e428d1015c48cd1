//! Star-rating picker.
//!
//! The labels are laid out `row-reverse`, so the first label in DOM order is
//! the highest rating.

use smallvec::SmallVec;

use crate::config::BehaviorConfig;

pub type StarTones = SmallVec<[StarTone; 5]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarTone {
    Active,
    Muted,
}

impl StarTone {
    #[must_use]
    pub fn color(self, config: &BehaviorConfig) -> &str {
        match self {
            Self::Active => &config.star_active_color,
            Self::Muted => &config.star_muted_color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarPicker {
    count: usize,
}

impl StarPicker {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self { count }
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Rating for a click on the label at `idx` (DOM order).
    #[must_use]
    pub fn rating_for_index(&self, idx: usize) -> Option<usize> {
        (idx < self.count).then(|| self.count - idx)
    }

    /// Colouring after a click: the clicked label and everything after it
    /// in DOM order light up.
    #[must_use]
    pub fn tones_for_click(&self, idx: usize) -> StarTones {
        (0..self.count)
            .map(|i| if i >= idx { StarTone::Active } else { StarTone::Muted })
            .collect()
    }

    /// Colouring for an existing value, e.g. when editing a review.
    #[must_use]
    pub fn tones_for_value(&self, value: usize) -> StarTones {
        (0..self.count)
            .map(|i| {
                if self.count - i <= value {
                    StarTone::Active
                } else {
                    StarTone::Muted
                }
            })
            .collect()
    }

    /// Handle a click: the value for the hidden field and the new colouring.
    #[must_use]
    pub fn click(&self, idx: usize) -> Option<(usize, StarTones)> {
        let rating = self.rating_for_index(idx)?;
        Some((rating, self.tones_for_click(idx)))
    }

    /// Colouring for the hidden field's text at load, if it holds a rating.
    #[must_use]
    pub fn prefill(&self, field_value: &str) -> Option<StarTones> {
        let value = crate::stepper::parse_leading_int(field_value)?;
        let value = usize::try_from(value).ok()?;
        Some(self.tones_for_value(value))
    }
}
