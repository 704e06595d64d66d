//! Externally observable navigation state.

use serde::{Deserialize, Serialize};

/// Where the current selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrigin {
    /// Resolved from the location at controller start-up.
    Initial,
    /// A click, key press, or other direct request.
    User,
    /// Replayed from a back/forward history event.
    History,
}

/// The selected key and its origin.
///
/// `selected` is `None` only for an empty panel set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    selected: Option<String>,
    origin: SelectionOrigin,
}

impl NavigationState {
    /// Creates the initial state for `selected`.
    pub fn new(selected: Option<String>) -> Self {
        Self {
            selected,
            origin: SelectionOrigin::Initial,
        }
    }

    /// Returns the selected key.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Returns what caused the current selection.
    pub fn origin(&self) -> SelectionOrigin {
        self.origin
    }

    /// Returns `true` if `key` is the selected key.
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.as_deref() == Some(key)
    }

    /// Returns a new state selecting `key`.
    #[must_use]
    pub fn with_selection(self, key: impl Into<String>, origin: SelectionOrigin) -> Self {
        Self {
            selected: Some(key.into()),
            origin,
        }
    }
}
