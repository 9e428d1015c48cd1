//! Timed notices: dismissible alerts and the announcement banner.

/// A transient alert that can be closed programmatically.
///
/// The web layer backs this with the UI library's alert instance; tests use
/// a flag.
pub trait DismissibleNotice {
    fn close(&self);
}

/// Closes a fixed set of alerts together once their timer fires.
pub struct AlertDismissal<N> {
    notices: Vec<N>,
    delay_ms: u32,
}

impl<N: DismissibleNotice> AlertDismissal<N> {
    #[must_use]
    pub const fn new(notices: Vec<N>, delay_ms: u32) -> Self {
        Self { notices, delay_ms }
    }

    #[must_use]
    pub const fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn fire(&self) {
        for notice in &self.notices {
            notice.close();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseReason {
    Timer,
    CloseClicked,
}

/// Inline styles applied, in order, to collapse the banner.
pub const COLLAPSE_STYLES: [(&str, &str); 5] = [
    ("transition", "opacity 0.4s ease, max-height 0.4s ease, padding 0.4s ease"),
    ("overflow", "hidden"),
    ("opacity", "0"),
    ("max-height", "0"),
    ("padding", "0"),
];

/// The site-wide announcement strip. Collapses once, whichever of the timer
/// or the close button gets there first.
#[derive(Debug, Default)]
pub struct AnnouncementBanner {
    collapsed: Option<CollapseReason>,
}

impl AnnouncementBanner {
    /// Returns `true` if this call collapsed the banner.
    pub fn collapse(&mut self, reason: CollapseReason) -> bool {
        if self.collapsed.is_some() {
            return false;
        }
        self.collapsed = Some(reason);
        true
    }

    #[must_use]
    pub const fn collapsed_by(&self) -> Option<CollapseReason> {
        self.collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Flag<'a>(&'a Cell<u32>);

    impl DismissibleNotice for Flag<'_> {
        fn close(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn firing_closes_every_alert() {
        let a = Cell::new(0);
        let b = Cell::new(0);
        let dismissal = AlertDismissal::new(vec![Flag(&a), Flag(&b)], 4_000);
        assert_eq!(dismissal.delay_ms(), 4_000);
        dismissal.fire();
        assert_eq!((a.get(), b.get()), (1, 1));
    }

    #[test]
    fn banner_collapses_once() {
        let mut banner = AnnouncementBanner::default();
        assert!(banner.collapse(CollapseReason::CloseClicked));
        assert!(!banner.collapse(CollapseReason::Timer));
        assert_eq!(banner.collapsed_by(), Some(CollapseReason::CloseClicked));
    }
}
