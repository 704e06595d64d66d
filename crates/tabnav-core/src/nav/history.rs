//! Session history: the adapter contract and an in-memory implementation.
//!
//! The controller never touches a host's navigation primitives directly. It
//! talks to a [`HistoryAdapter`], which can push or replace entries and hand
//! out a [`HistorySubscription`] that receives a [`HistoryEvent`] whenever
//! the user moves back or forward.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use url::Url;

/// State object stored alongside each history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub key: Option<String>,
}

impl HistoryState {
    /// Returns the state recorded for a selection of `key`.
    pub fn for_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }
}

/// One entry of session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// `None` for entries the controller did not create, such as the page
    /// the session started on.
    pub state: Option<HistoryState>,
    pub title: String,
    pub url: Url,
}

impl HistoryEntry {
    /// Returns the entry a page load starts on: no state, no title.
    pub fn landing(url: Url) -> Self {
        Self {
            state: None,
            title: String::new(),
            url,
        }
    }
}

/// Delivered to subscribers after a back/forward move.
///
/// Carries the entry that became current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    pub state: Option<HistoryState>,
    pub url: Url,
}

impl HistoryEvent {
    /// The key stored in the entry's state, if the controller wrote one.
    pub fn state_key(&self) -> Option<&str> {
        self.state.as_ref().and_then(|s| s.key.as_deref())
    }
}

impl From<&HistoryEntry> for HistoryEvent {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            state: entry.state.clone(),
            url: entry.url.clone(),
        }
    }
}

/// Receiving end of a history subscription. Dropping it unsubscribes.
pub type HistorySubscription = UnboundedReceiver<HistoryEvent>;

/// Capability to read and write the host's session history.
pub trait HistoryAdapter {
    /// The current address.
    fn location(&self) -> Url;
    /// Adds a new entry after the current one, discarding forward entries.
    fn push(&mut self, state: HistoryState, title: &str, url: &Url);
    /// Overwrites the current entry.
    fn replace(&mut self, state: HistoryState, title: &str, url: &Url);
    /// Registers for back/forward notifications.
    fn subscribe(&mut self) -> HistorySubscription;
}

/// Immutable back/forward stacks around a current entry.
///
/// Every mutation returns a **new** `Timeline`. Pushing clears the forward
/// stack, same as a web browser.
#[derive(Debug, Clone)]
pub struct Timeline {
    back_stack: Vec<HistoryEntry>,
    current: HistoryEntry,
    forward_stack: Vec<HistoryEntry>,
}

impl Timeline {
    /// Creates a timeline holding only `current`.
    pub fn new(current: HistoryEntry) -> Self {
        Self {
            back_stack: Vec::new(),
            current,
            forward_stack: Vec::new(),
        }
    }

    /// Returns the entry the timeline is on.
    pub fn current(&self) -> &HistoryEntry {
        &self.current
    }

    /// Makes `entry` current, moving the old current onto the back stack.
    pub fn push(&self, entry: HistoryEntry) -> Self {
        let mut back_stack = self.back_stack.clone();
        back_stack.push(self.current.clone());
        Self {
            back_stack,
            current: entry,
            forward_stack: Vec::new(),
        }
    }

    /// Swaps the current entry in place.
    pub fn replace(&self, entry: HistoryEntry) -> Self {
        Self {
            current: entry,
            ..self.clone()
        }
    }

    /// Go back one step, or `None` at the start of history.
    pub fn go_back(&self) -> Option<Self> {
        let mut back_stack = self.back_stack.clone();
        let previous = back_stack.pop()?;
        let mut forward_stack = self.forward_stack.clone();
        forward_stack.push(self.current.clone());
        Some(Self {
            back_stack,
            current: previous,
            forward_stack,
        })
    }

    /// Go forward one step, or `None` at the end of history.
    pub fn go_forward(&self) -> Option<Self> {
        let mut forward_stack = self.forward_stack.clone();
        let next = forward_stack.pop()?;
        let mut back_stack = self.back_stack.clone();
        back_stack.push(self.current.clone());
        Some(Self {
            back_stack,
            current: next,
            forward_stack,
        })
    }

    /// Returns `true` if there is an entry behind the current one.
    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    /// Returns `true` if there is an entry ahead of the current one.
    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    /// Total number of entries, current included.
    pub fn entry_count(&self) -> usize {
        self.back_stack.len() + 1 + self.forward_stack.len()
    }
}

/// [`HistoryAdapter`] backed by a [`Timeline`] held in memory.
///
/// `back` and `forward` simulate the browser buttons and notify every live
/// subscriber. Push and replace calls are counted.
#[derive(Debug)]
pub struct InMemoryHistory {
    timeline: Timeline,
    subscribers: Vec<UnboundedSender<HistoryEvent>>,
    pushes: usize,
    replaces: usize,
}

impl InMemoryHistory {
    /// Starts a session on `location`.
    pub fn new(location: Url) -> Self {
        Self {
            timeline: Timeline::new(HistoryEntry::landing(location)),
            subscribers: Vec::new(),
            pushes: 0,
            replaces: 0,
        }
    }

    /// Returns the recorded timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Returns the current history entry.
    pub fn current(&self) -> &HistoryEntry {
        self.timeline.current()
    }

    /// Returns how many times `push` was called.
    pub fn push_count(&self) -> usize {
        self.pushes
    }

    /// Returns how many times `replace` was called.
    pub fn replace_count(&self) -> usize {
        self.replaces
    }

    /// Number of subscriptions still held by a receiver.
    pub fn live_subscribers(&self) -> usize {
        self.subscribers.iter().filter(|tx| !tx.is_closed()).count()
    }

    /// Simulates the back button. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        match self.timeline.go_back() {
            Some(timeline) => {
                self.timeline = timeline;
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Simulates the forward button. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        match self.timeline.go_forward() {
            Some(timeline) => {
                self.timeline = timeline;
                self.notify();
                true
            }
            None => false,
        }
    }

    fn notify(&mut self) {
        let event = HistoryEvent::from(self.timeline.current());
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        tracing::debug!("history moved to {}", event.url);
    }
}

impl HistoryAdapter for InMemoryHistory {
    fn location(&self) -> Url {
        self.timeline.current().url.clone()
    }

    fn push(&mut self, state: HistoryState, title: &str, url: &Url) {
        self.pushes += 1;
        self.timeline = self.timeline.push(HistoryEntry {
            state: Some(state),
            title: title.to_string(),
            url: url.clone(),
        });
    }

    fn replace(&mut self, state: HistoryState, title: &str, url: &Url) {
        self.replaces += 1;
        self.timeline = self.timeline.replace(HistoryEntry {
            state: Some(state),
            title: title.to_string(),
            url: url.clone(),
        });
    }

    fn subscribe(&mut self) -> HistorySubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }
}
