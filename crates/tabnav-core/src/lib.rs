//! TabNav core library: UI-agnostic bookmarkable panel navigation.
//!
//! `tabnav-core` keeps one selected panel per navigation region in sync with
//! user clicks, the address bar, and back/forward history. It never touches
//! a host's DOM or navigation primitives; those arrive as injected
//! [`HistoryAdapter`] and [`PanelRenderer`] implementations.
//!
//! # Modules
//!
//! - [`nav`]: Navigation logic: panels, bookmarks, history, rendering seams, and the controller.
//! - [`sticky`]: Sticky nav placement and scroll spying.
//! - [`config`]: Region configuration (TOML-based settings).
//! - [`event`]: Command and event types for host ↔ controller communication.
//! - [`error`]: Error types ([`CoreError`], [`RenderError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod error;
pub mod event;
pub mod nav;
pub mod sticky;

pub use error::{CoreError, CoreResult, RenderError};
pub use event::{Command, Event};
pub use nav::bookmark::{parse_location, Bookmark, BookmarkStyle};
pub use nav::controller::{FetchRequest, NavigationController, Phase};
pub use nav::history::{
    HistoryAdapter, HistoryEntry, HistoryEvent, HistoryState, HistorySubscription,
    InMemoryHistory, Timeline,
};
pub use nav::panel::{Direction, Panel, PanelSet};
pub use nav::render::{BodyFetcher, PanelRenderer, RecordingRenderer, RenderOp};
pub use nav::state::{NavigationState, SelectionOrigin};

pub use config::settings::{BookmarkKind, Config, HistoryMode, NavigationConfig, StickyConfig};
pub use sticky::{NavPosition, ScrollMetrics, Section, StickyNav};
