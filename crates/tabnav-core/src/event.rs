//! Event system for communication between a host and the controller.
//!
//! The host translates user input and browser notifications into
//! [`Command`]s, which the controller processes and answers with
//! [`Event`]s. This decoupling allows any frontend to drive the same
//! navigation logic.

use crate::error::RenderError;
use crate::nav::controller::FetchRequest;
use crate::nav::history::HistoryEvent;
use crate::nav::state::SelectionOrigin;

/// An action the host requests the controller to perform.
///
/// Commands flow **host → controller**. The controller never creates
/// commands itself.
#[derive(Debug, Clone)]
pub enum Command {
    /// Select the panel with the given key (a click on its tab).
    Select(String),
    /// Select the panel after the current one.
    SelectNext,
    /// Select the panel before the current one.
    SelectPrevious,
    /// The user moved back or forward through session history.
    HistoryChanged(HistoryEvent),
    /// Finish the running panel animation now.
    AnimationComplete,
    /// The timer started for the transition tagged `generation` ran out.
    /// Ignored when a newer render has started since.
    AnimationElapsed { generation: u64 },
    /// A body fetch issued for a [`FetchRequest`] has finished.
    BodyLoaded {
        request: FetchRequest,
        result: Result<String, RenderError>,
    },
}

/// A notification the controller sends back to the host.
///
/// Events flow **controller → host**. Hosts drain them after each command.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The selected key changed.
    SelectionChanged {
        key: String,
        origin: SelectionOrigin,
    },
    /// All panels were hidden and an animated transition began. Hosts
    /// running a timer hand `generation` back in
    /// [`Command::AnimationElapsed`].
    TransitionStarted { key: String, generation: u64 },
    /// A newer selection replaced the in-flight transition before it
    /// rendered.
    TransitionSuperseded { from: String, to: String },
    /// `key` is now shown on the surface.
    TransitionCompleted { key: String },
    /// A lazy panel's body must be fetched, either because it was shown or
    /// because the region preloads bodies.
    BodyRequested(FetchRequest),
    /// A fetched body was stored on its panel.
    BodyLoaded { key: String },
    /// Loading the body of `key` failed; the panel stays shown but empty.
    RenderFailed { key: String, error: RenderError },
}
