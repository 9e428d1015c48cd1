//! Scroll-driven behaviours: the navbar shadow and menu section sync.

use smallvec::SmallVec;

use crate::constants::{NAV_SHADOW, NAV_SHADOW_NONE};

/// Box shadow for `#main-nav` at the given scroll offset.
#[must_use]
pub fn nav_shadow(scroll_y: f64, threshold: f64) -> &'static str {
    if scroll_y > threshold {
        NAV_SHADOW
    } else {
        NAV_SHADOW_NONE
    }
}

/// Menu category links, keyed by the section slug each one points at.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionNav {
    link_sections: Vec<Option<String>>,
    header_offset: f64,
}

impl SectionNav {
    #[must_use]
    pub const fn new(link_sections: Vec<Option<String>>, header_offset: f64) -> Self {
        Self {
            link_sections,
            header_offset,
        }
    }

    #[must_use]
    pub fn link_section(&self, idx: usize) -> Option<&str> {
        self.link_sections.get(idx).and_then(|s| s.as_deref())
    }

    /// Active flags for every link once the section `slug` intersects.
    #[must_use]
    pub fn activate(&self, slug: &str) -> SmallVec<[bool; 16]> {
        self.link_sections
            .iter()
            .map(|s| s.as_deref() == Some(slug))
            .collect()
    }

    /// Document offset to scroll to so the section clears the fixed header.
    #[must_use]
    pub fn scroll_target(&self, rect_top: f64, scroll_y: f64) -> f64 {
        rect_top + scroll_y - self.header_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_appears_past_threshold() {
        assert_eq!(nav_shadow(0.0, 30.0), "none");
        assert_eq!(nav_shadow(30.0, 30.0), "none");
        assert_eq!(nav_shadow(30.5, 30.0), NAV_SHADOW);
    }

    #[test]
    fn activate_marks_every_matching_link() {
        let nav = SectionNav::new(
            vec![
                Some("starters".into()),
                Some("mains".into()),
                Some("starters".into()),
                None,
            ],
            90.0,
        );
        assert_eq!(nav.activate("starters").as_slice(), &[true, false, true, false]);
        assert_eq!(nav.activate("desserts").as_slice(), &[false; 4]);
    }

    #[test]
    fn scroll_target_subtracts_header() {
        let nav = SectionNav::new(Vec::new(), 90.0);
        assert!((nav.scroll_target(400.0, 1_000.0) - 1_310.0).abs() < f64::EPSILON);
    }
}
