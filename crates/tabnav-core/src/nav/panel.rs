//! Panels and ordered panel sets.
//!
//! A [`Panel`] is one selectable content section. A [`PanelSet`] keeps the
//! panels of one navigation region in display order and enforces the two
//! set-level invariants: keys are unique, and at most one panel is visible.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A single content section identified by a stable key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    key: String,
    title: String,
    #[serde(default)]
    visible: bool,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    lazy: bool,
}

impl Panel {
    /// Creates a hidden, pre-rendered panel with no body.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            visible: false,
            body: None,
            lazy: false,
        }
    }

    /// Returns the panel with `body` as its pre-rendered content.
    #[must_use]
    pub fn with_body(self, body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..self
        }
    }

    /// Marks the panel as lazily loaded: its body is fetched on first show.
    #[must_use]
    pub fn lazy(self) -> Self {
        Self { lazy: true, ..self }
    }

    /// Returns the stable key used in bookmarks.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the human-readable title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns `true` if this is the panel on screen.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the body, pre-rendered or fetched, if there is one.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns `true` if the body is fetched on demand.
    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    /// `true` when the panel is lazy and its body has not arrived yet.
    pub fn needs_fetch(&self) -> bool {
        self.lazy && self.body.is_none()
    }
}

/// Direction used when stepping to a neighbouring panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// An ordered set of panels with unique keys and single selection.
///
/// Immutable: every visibility or body change returns a new `PanelSet`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelSet {
    panels: Vec<Panel>,
}

impl PanelSet {
    /// Builds a set from `panels`, keeping their order.
    ///
    /// All panels start hidden regardless of their incoming flag; the
    /// controller decides what becomes visible.
    ///
    /// # Errors
    ///
    /// - [`CoreError::EmptyKey`] if a panel's key is empty.
    /// - [`CoreError::DuplicateKey`] if two panels share a key.
    pub fn new(panels: Vec<Panel>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(panels.len());
        for panel in &panels {
            if panel.key.is_empty() {
                return Err(CoreError::EmptyKey);
            }
            if !seen.insert(panel.key.as_str()) {
                return Err(CoreError::DuplicateKey(panel.key.clone()));
            }
        }
        let panels = panels
            .into_iter()
            .map(|p| Panel {
                visible: false,
                ..p
            })
            .collect();
        Ok(Self { panels })
    }

    /// Creates an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns `true` if the set has no panels.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Returns the panels in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    /// Returns the keys in display order.
    pub fn keys(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.key.as_str()).collect()
    }

    /// Returns the panel under `key`.
    pub fn get(&self, key: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.key == key)
    }

    /// Returns the display index of `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.key == key)
    }

    /// Returns `true` if a panel has `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns the first panel in display order.
    pub fn first(&self) -> Option<&Panel> {
        self.panels.first()
    }

    /// Returns the visible panel, if any.
    pub fn visible(&self) -> Option<&Panel> {
        self.panels.iter().find(|p| p.visible)
    }

    /// Returns the panel adjacent to `key` in `direction`.
    ///
    /// There is no wrap-around: the first panel has no previous neighbour
    /// and the last has no next one.
    pub fn neighbour(&self, key: &str, direction: Direction) -> Option<&Panel> {
        let index = self.position(key)?;
        match direction {
            Direction::Next => self.panels.get(index + 1),
            Direction::Previous => index.checked_sub(1).and_then(|i| self.panels.get(i)),
        }
    }

    /// Returns a set where only `key` is visible.
    ///
    /// An unknown key leaves the set unchanged.
    #[must_use]
    pub fn with_visible(self, key: &str) -> Self {
        if !self.contains(key) {
            return self;
        }
        let panels = self
            .panels
            .into_iter()
            .map(|p| {
                let visible = p.key == key;
                Panel { visible, ..p }
            })
            .collect();
        Self { panels }
    }

    /// Returns a set with every panel hidden.
    #[must_use]
    pub fn with_none_visible(self) -> Self {
        let panels = self
            .panels
            .into_iter()
            .map(|p| Panel {
                visible: false,
                ..p
            })
            .collect();
        Self { panels }
    }

    /// Returns a set where the panel under `key` carries `body`.
    #[must_use]
    pub fn with_body(self, key: &str, body: impl Into<String>) -> Self {
        let body = body.into();
        let panels = self
            .panels
            .into_iter()
            .map(|p| {
                if p.key == key {
                    Panel {
                        body: Some(body.clone()),
                        ..p
                    }
                } else {
                    p
                }
            })
            .collect();
        Self { panels }
    }
}
