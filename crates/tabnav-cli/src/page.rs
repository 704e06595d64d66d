//! Simulated page layout for the sticky nav and scroll spy.
//!
//! The terminal has no real page, so panels are laid out one below the
//! other in a single column of fixed-height sections under a header, with
//! the nav bar just below the header.

use tabnav_core::{NavPosition, PanelSet, ScrollMetrics, Section, StickyConfig, StickyNav};

const WINDOW_HEIGHT: f64 = 800.0;
const HEADER_HEIGHT: f64 = 200.0;
const NAV_HEIGHT: f64 = 48.0;
const SECTION_HEIGHT: f64 = 1000.0;

#[derive(Debug, Clone)]
pub struct Page {
    sticky: StickyNav,
    sections: Vec<Section>,
}

impl Page {
    /// Lays `panels` out in display order.
    pub fn new(panels: &PanelSet, config: &StickyConfig) -> Self {
        let sections = panels
            .iter()
            .enumerate()
            .map(|(i, panel)| {
                let top = content_top() + i as f64 * SECTION_HEIGHT;
                Section::new(panel.key(), top)
            })
            .collect();
        Self {
            sticky: StickyNav::new(config),
            sections,
        }
    }

    /// Returns the nav placement and the section under the viewport top
    /// after scrolling to `scroll_top`.
    pub fn scroll_to(&self, scroll_top: f64) -> (NavPosition, Option<&str>) {
        let position = self.sticky.position(&self.metrics(scroll_top));
        (position, self.sticky.spy(&self.sections, scroll_top))
    }

    fn metrics(&self, scroll_top: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            window_height: WINDOW_HEIGHT,
            header_offset: HEADER_HEIGHT,
            nav_height: NAV_HEIGHT,
            nav_bottom: scroll_top.max(HEADER_HEIGHT) + NAV_HEIGHT,
            content_end: content_top() + self.sections.len() as f64 * SECTION_HEIGHT,
        }
    }
}

fn content_top() -> f64 {
    HEADER_HEIGHT + NAV_HEIGHT
}

/// One-line description of a nav placement.
pub fn describe(position: NavPosition) -> String {
    match position {
        NavPosition::Static => "-- nav: in flow".to_string(),
        NavPosition::Stuck { top } => format!("-- nav: stuck at {top}px"),
        NavPosition::Pinned { bottom } => format!("-- nav: pinned {bottom}px above the end"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabnav_core::Panel;

    fn page() -> Page {
        let panels = PanelSet::new(vec![
            Panel::new("overview", "Overview"),
            Panel::new("pricing", "Pricing"),
            Panel::new("support", "Support"),
        ])
        .unwrap();
        Page::new(&panels, &StickyConfig::default())
    }

    #[test]
    fn top_of_page_is_in_flow_on_first_section() {
        let page_ = page();
        let (position, section) = page_.scroll_to(0.0);
        assert_eq!(position, NavPosition::Static);
        assert_eq!(section, None);

        let page_ = page();
        let (_, section) = page_.scroll_to(240.0);
        assert_eq!(section, Some("overview"));
    }

    #[test]
    fn scrolling_past_header_sticks_the_nav() {
        let page_ = page();
        let (position, section) = page_.scroll_to(1300.0);
        assert_eq!(position, NavPosition::Stuck { top: 0.0 });
        assert_eq!(section, Some("pricing"));
    }

    #[test]
    fn nav_pins_near_end_of_content() {
        // content ends at 3248; 2600 + 48 + 30 > 3248 - 752
        let page_ = page();
        let (position, section) = page_.scroll_to(2600.0);
        assert_eq!(position, NavPosition::Pinned { bottom: 752.0 });
        assert_eq!(section, Some("support"));
    }

    #[test]
    fn describe_each_position() {
        assert_eq!(describe(NavPosition::Static), "-- nav: in flow");
        assert_eq!(describe(NavPosition::Stuck { top: -20.0 }), "-- nav: stuck at -20px");
        assert_eq!(
            describe(NavPosition::Pinned { bottom: 752.0 }),
            "-- nav: pinned 752px above the end"
        );
    }
}
