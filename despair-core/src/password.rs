//! Show/hide control for password fields.

use std::collections::HashSet;
use std::hash::Hash;

use crate::constants::{PASSWORD_MASKED_COLOR, PASSWORD_REVEALED_COLOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Masked,
    Revealed,
}

impl Visibility {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Masked => Self::Revealed,
            Self::Revealed => Self::Masked,
        }
    }

    /// `type` attribute for the input.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Masked => "password",
            Self::Revealed => "text",
        }
    }

    /// Icon shown on the toggle: the action it will perform next.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Masked => "fa-solid fa-eye",
            Self::Revealed => "fa-solid fa-eye-slash",
        }
    }

    #[must_use]
    pub const fn icon_color(self) -> &'static str {
        match self {
            Self::Masked => PASSWORD_MASKED_COLOR,
            Self::Revealed => PASSWORD_REVEALED_COLOR,
        }
    }

    #[must_use]
    pub const fn aria_label(self) -> &'static str {
        match self {
            Self::Masked => "Show password",
            Self::Revealed => "Hide password",
        }
    }

    /// Read back from the input's current `type`.
    #[must_use]
    pub fn from_input_type(input_type: &str) -> Self {
        if input_type.eq_ignore_ascii_case("password") {
            Self::Masked
        } else {
            Self::Revealed
        }
    }
}

/// Remembers which elements a behaviour has already been applied to.
pub trait InitTracker<K: ?Sized> {
    /// Returns `true` the first time `key` is seen.
    fn first_time(&mut self, key: &K) -> bool;

    /// Forget `key` so a later pass picks it up again.
    fn release(&mut self, key: &K);
}

/// Hash-set tracker for keys that are plain values.
#[derive(Debug)]
pub struct InitRegistry<K> {
    seen: HashSet<K>,
}

impl<K> Default for InitRegistry<K> {
    fn default() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> InitTracker<K> for InitRegistry<K> {
    fn first_time(&mut self, key: &K) -> bool {
        self.seen.insert(key.clone())
    }

    fn release(&mut self, key: &K) {
        self.seen.remove(key);
    }
}

impl<K> InitRegistry<K> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Keep only the candidates the tracker has not seen before.
pub fn claim_new<K, T>(tracker: &mut T, candidates: impl IntoIterator<Item = K>) -> Vec<K>
where
    T: InitTracker<K>,
{
    candidates
        .into_iter()
        .filter(|key| tracker.first_time(key))
        .collect()
}

/// Outcome of one [`init_each`] pass.
#[derive(Debug)]
pub struct InitPass<E> {
    pub applied: usize,
    pub failures: Vec<E>,
}

/// Run `init` on every candidate the tracker has not seen yet.
///
/// A candidate whose `init` fails is released again, so it stays eligible
/// for the next pass. One failure never stops the others.
pub fn init_each<K, T, E>(
    tracker: &mut T,
    candidates: impl IntoIterator<Item = K>,
    mut init: impl FnMut(&K) -> Result<(), E>,
) -> InitPass<E>
where
    T: InitTracker<K>,
{
    let mut pass = InitPass {
        applied: 0,
        failures: Vec::new(),
    };
    for key in candidates {
        if !tracker.first_time(&key) {
            continue;
        }
        match init(&key) {
            Ok(()) => pass.applied += 1,
            Err(err) => {
                tracker.release(&key);
                pass.failures.push(err);
            }
        }
    }
    pass
}
