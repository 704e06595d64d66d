//! Sticky navigation bar placement and scroll spying.
//!
//! Pure geometry: the host measures the page (scroll position, element
//! offsets) and applies the returned [`NavPosition`]. [`StickyNav::spy`]
//! maps a scroll position to the section under the viewport top, which the
//! host may feed to [`crate::NavigationController::select_by_key`].

use crate::config::settings::StickyConfig;

/// Page measurements taken on every scroll or resize, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub window_height: f64,
    /// Document offset where the nav sits when not stuck.
    pub header_offset: f64,
    pub nav_height: f64,
    /// Document offset of the nav's bottom edge at its current placement.
    pub nav_bottom: f64,
    /// Document offset of the end-of-content marker the nav must not cover.
    pub content_end: f64,
}

/// Where the nav bar should be placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavPosition {
    /// In normal document flow.
    Static,
    /// Fixed to the viewport at `top` (negative when the nav is taller than
    /// the window, so its lower part stays reachable).
    Stuck { top: f64 },
    /// Absolutely positioned `bottom` pixels above the end of its container,
    /// so it stops before the end-of-content marker.
    Pinned { bottom: f64 },
}

/// A section tracked by the scroll spy.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub key: String,
    /// Document offset of the section's top edge.
    pub top: f64,
}

impl Section {
    /// Creates a section starting `top` pixels down the document.
    pub fn new(key: impl Into<String>, top: f64) -> Self {
        Self {
            key: key.into(),
            top,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StickyNav {
    spy_threshold: f64,
    bottom_gap: f64,
}

impl Default for StickyNav {
    fn default() -> Self {
        Self::new(&StickyConfig::default())
    }
}

impl StickyNav {
    /// Creates a sticky nav tuned by `config`.
    pub fn new(config: &StickyConfig) -> Self {
        Self {
            spy_threshold: config.spy_threshold,
            bottom_gap: config.bottom_gap,
        }
    }

    /// Computes the nav placement for `metrics`.
    pub fn position(&self, metrics: &ScrollMetrics) -> NavPosition {
        let distance_from_bottom = metrics.window_height - metrics.nav_height;
        let overflow = (metrics.nav_height - metrics.window_height).max(0.0);

        let clear_of_end =
            metrics.nav_bottom + self.bottom_gap <= metrics.content_end - distance_from_bottom;
        if !clear_of_end {
            return NavPosition::Pinned {
                bottom: distance_from_bottom,
            };
        }
        if metrics.scroll_top >= metrics.header_offset + overflow {
            let top = if overflow > 0.0 { -overflow } else { 0.0 };
            NavPosition::Stuck { top }
        } else {
            NavPosition::Static
        }
    }

    /// Returns the key of the last section, in document order, whose top
    /// minus the spy threshold has been scrolled past.
    pub fn spy<'a>(&self, sections: &'a [Section], scroll_top: f64) -> Option<&'a str> {
        sections
            .iter()
            .rev()
            .find(|s| scroll_top > s.top - self.spy_threshold)
            .map(|s| s.key.as_str())
    }
}
