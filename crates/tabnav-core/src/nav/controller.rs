//! The navigation controller for one panel region.
//!
//! [`NavigationController`] owns the [`NavigationState`] of a region and is
//! the only place selection changes. It reads the starting location once,
//! keeps exactly one panel visible, writes bookmarks into session history on
//! user selections, and replays back/forward moves without writing history.
//!
//! Visible changes go through a two-phase machine ([`Phase`]). While an
//! animated transition runs, further selections still update the state
//! immediately but only the most recent one is rendered once the animation
//! completes.

use url::Url;

use crate::config::settings::{HistoryMode, NavigationConfig};
use crate::error::RenderError;
use crate::event::{Command, Event};
use crate::nav::bookmark::{Bookmark, BookmarkStyle};
use crate::nav::history::{HistoryAdapter, HistoryEvent, HistoryState, HistorySubscription};
use crate::nav::panel::{Direction, PanelSet};
use crate::nav::render::PanelRenderer;
use crate::nav::state::{NavigationState, SelectionOrigin};

/// Render phase of the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// The selected panel is on screen.
    Idle,
    /// Panels are hidden and `target` is animating in. `queued` holds the
    /// latest selection made in the meantime; earlier ones are dropped.
    Transitioning {
        target: String,
        queued: Option<String>,
    },
}

/// A body fetch the host should run for a lazy panel.
///
/// `generation` identifies the render that asked for it; a result arriving
/// after a newer render started is stored but not injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: String,
    pub generation: u64,
}

/// Keeps one panel region in sync with clicks and session history.
pub struct NavigationController<H, R> {
    panels: PanelSet,
    state: NavigationState,
    phase: Phase,
    style: BookmarkStyle,
    config: NavigationConfig,
    fallback: Option<String>,
    generation: u64,
    events: Vec<Event>,
    history: H,
    renderer: R,
}

impl<H, R> NavigationController<H, R>
where
    H: HistoryAdapter,
    R: PanelRenderer,
{
    /// Creates a controller and renders the initial selection.
    ///
    /// The location is read once. A known bookmarked key wins, then the
    /// configured default, then the first panel. An empty set leaves the
    /// region with no selection.
    pub fn new(panels: PanelSet, config: NavigationConfig, history: H, renderer: R) -> Self {
        let style = config.bookmark_style();
        let fallback = fallback_key(&panels, config.default_key.as_deref());

        let location = history.location();
        let bookmarked = Bookmark::decode(&location, &style)
            .map(Bookmark::into_key)
            .filter(|key| {
                let known = panels.contains(key);
                if !known {
                    tracing::debug!("ignoring unknown bookmarked panel: {key}");
                }
                known
            });
        let selected = bookmarked.or_else(|| fallback.clone());

        let mut controller = Self {
            panels,
            state: NavigationState::new(selected.clone()),
            phase: Phase::Idle,
            style,
            config,
            fallback,
            generation: 0,
            events: Vec::new(),
            history,
            renderer,
        };

        match selected {
            Some(key) => {
                controller.panels = std::mem::take(&mut controller.panels).with_visible(&key);
                controller.renderer.hide_all();
                controller.commit(&key);
            }
            None => tracing::warn!("navigation region has no panels; nothing is selected"),
        }
        if controller.config.prefetch {
            controller.request_unloaded_bodies();
        }
        controller
    }

    /// Selects `key` as a user action.
    ///
    /// Unknown keys and the already-selected key are ignored. Returns `true`
    /// when the selection changed.
    pub fn select_by_key(&mut self, key: &str) -> bool {
        self.select(key, SelectionOrigin::User)
    }

    /// Selects the panel after the current one. No-op on the last panel.
    pub fn select_next(&mut self) -> bool {
        self.step(Direction::Next)
    }

    /// Selects the panel before the current one. No-op on the first panel.
    pub fn select_previous(&mut self) -> bool {
        self.step(Direction::Previous)
    }

    /// Replays a back/forward move.
    ///
    /// The target is the key stored in the entry's state, else the key
    /// decoded from its URL, else the region's default. History is never
    /// written from here.
    pub fn on_history_change(&mut self, event: &HistoryEvent) -> bool {
        let target = event
            .state_key()
            .map(str::to_string)
            .or_else(|| Bookmark::decode(&event.url, &self.style).map(Bookmark::into_key))
            .or_else(|| self.fallback.clone());
        match target {
            Some(key) => self.select(&key, SelectionOrigin::History),
            None => false,
        }
    }

    /// Finishes the running animation.
    ///
    /// If a newer selection was queued, the in-flight render is dropped and
    /// the transition restarts toward it. Otherwise the target is shown.
    pub fn animation_complete(&mut self) {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::Transitioning { target, queued } = phase else {
            tracing::debug!("animation complete while idle; ignored");
            return;
        };
        match queued {
            Some(next) => {
                tracing::debug!("transition to {target} superseded by {next}");
                self.generation += 1;
                self.events.push(Event::TransitionSuperseded {
                    from: target,
                    to: next.clone(),
                });
                self.events.push(Event::TransitionStarted {
                    key: next.clone(),
                    generation: self.generation,
                });
                self.phase = Phase::Transitioning {
                    target: next,
                    queued: None,
                };
            }
            None => self.commit(&target),
        }
    }

    /// Finishes the transition tagged `generation` when its timer runs out.
    ///
    /// Returns `false` and changes nothing if a newer render has started
    /// since or no transition is running.
    pub fn animation_elapsed(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.is_transitioning() {
            tracing::debug!(
                "ignoring animation timer for generation {generation} (current {})",
                self.generation
            );
            return false;
        }
        self.animation_complete();
        true
    }

    /// Applies the outcome of a body fetch.
    ///
    /// A loaded body is always stored on its panel and injected only when
    /// the request belongs to the render currently on screen. A failure
    /// leaves the panel shown with no body and is reported as
    /// [`Event::RenderFailed`].
    pub fn on_body_loaded(&mut self, request: &FetchRequest, result: Result<String, RenderError>) {
        match result {
            Ok(body) => {
                self.panels = std::mem::take(&mut self.panels).with_body(&request.key, body);
                self.events.push(Event::BodyLoaded {
                    key: request.key.clone(),
                });
                let current = request.generation == self.generation
                    && self.phase == Phase::Idle
                    && self.state.is_selected(&request.key);
                if !current {
                    tracing::debug!("stored stale body for {}", request.key);
                    return;
                }
                if let Some(panel) = self.panels.get(&request.key) {
                    self.renderer.inject_body(panel);
                }
            }
            Err(error) => {
                tracing::warn!("failed to load body for panel {}: {error}", request.key);
                self.events.push(Event::RenderFailed {
                    key: request.key.clone(),
                    error,
                });
            }
        }
    }

    /// Routes a [`Command`] to the matching operation.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Select(key) => {
                self.select_by_key(&key);
            }
            Command::SelectNext => {
                self.select_next();
            }
            Command::SelectPrevious => {
                self.select_previous();
            }
            Command::HistoryChanged(event) => {
                self.on_history_change(&event);
            }
            Command::AnimationComplete => self.animation_complete(),
            Command::AnimationElapsed { generation } => {
                self.animation_elapsed(generation);
            }
            Command::BodyLoaded { request, result } => self.on_body_loaded(&request, result),
        }
    }

    /// Registers with the history adapter for back/forward notifications.
    pub fn subscribe(&mut self) -> HistorySubscription {
        self.history.subscribe()
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Returns the current navigation state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Returns the selected key, or `None` for an empty region.
    pub fn selected_key(&self) -> Option<&str> {
        self.state.selected()
    }

    /// Returns the panels with their current visibility and bodies.
    pub fn panels(&self) -> &PanelSet {
        &self.panels
    }

    /// Returns the render phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns `true` while an animated transition is running.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// Returns the generation of the most recent render.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the bookmark style this region was configured with.
    pub fn bookmark_style(&self) -> &BookmarkStyle {
        &self.style
    }

    /// The address that reproduces the current selection, if any.
    pub fn bookmark_href(&self) -> Option<Url> {
        let key = self.state.selected()?;
        Some(Bookmark::new(key).href(&self.history.location(), &self.style))
    }

    /// Returns the history adapter.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns the history adapter for host-driven moves (back/forward).
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Returns the panel renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the panel renderer mutably, e.g. to flush buffered output.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Tears the controller down, handing back its collaborators.
    pub fn into_parts(self) -> (H, R) {
        (self.history, self.renderer)
    }

    fn step(&mut self, direction: Direction) -> bool {
        let Some(current) = self.state.selected() else {
            return false;
        };
        let Some(next) = self.panels.neighbour(current, direction) else {
            return false;
        };
        let key = next.key().to_string();
        self.select_by_key(&key)
    }

    fn select(&mut self, key: &str, origin: SelectionOrigin) -> bool {
        if !self.panels.contains(key) {
            tracing::debug!("ignoring unknown panel key: {key}");
            return false;
        }
        if self.state.is_selected(key) {
            return false;
        }

        self.state = self.state.clone().with_selection(key, origin);
        self.panels = std::mem::take(&mut self.panels).with_visible(key);
        self.events.push(Event::SelectionChanged {
            key: key.to_string(),
            origin,
        });
        if origin == SelectionOrigin::User {
            self.record_bookmark(key);
        }
        self.begin_render(key);
        true
    }

    fn record_bookmark(&mut self, key: &str) {
        let title = self.title_for(key);
        let url = Bookmark::new(key).href(&self.history.location(), &self.style);
        let state = HistoryState::for_key(key);
        match self.config.history_mode {
            HistoryMode::Push => self.history.push(state, &title, &url),
            HistoryMode::Replace => self.history.replace(state, &title, &url),
        }
    }

    fn begin_render(&mut self, key: &str) {
        if !self.config.animate {
            self.generation += 1;
            self.renderer.hide_all();
            self.commit(key);
            return;
        }
        if let Phase::Transitioning { target, queued } = &mut self.phase {
            *queued = (target.as_str() != key).then(|| key.to_string());
            return;
        }
        self.generation += 1;
        self.renderer.hide_all();
        self.events.push(Event::TransitionStarted {
            key: key.to_string(),
            generation: self.generation,
        });
        self.phase = Phase::Transitioning {
            target: key.to_string(),
            queued: None,
        };
    }

    fn commit(&mut self, key: &str) {
        let title = self.title_for(key);
        let Some(panel) = self.panels.get(key) else {
            return;
        };
        self.renderer.show(panel);
        self.renderer.set_title(&title);
        self.events.push(Event::TransitionCompleted {
            key: key.to_string(),
        });
        if panel.needs_fetch() {
            self.events.push(Event::BodyRequested(FetchRequest {
                key: key.to_string(),
                generation: self.generation,
            }));
        }
    }

    /// Asks for the body of every lazy panel still without one, except the
    /// selected panel whose request `commit` already issued.
    fn request_unloaded_bodies(&mut self) {
        let selected = self.state.selected();
        let requests: Vec<FetchRequest> = self
            .panels
            .iter()
            .filter(|p| p.needs_fetch() && Some(p.key()) != selected)
            .map(|p| FetchRequest {
                key: p.key().to_string(),
                generation: self.generation,
            })
            .collect();
        tracing::debug!("preloading {} panel bodies", requests.len());
        self.events.extend(requests.into_iter().map(Event::BodyRequested));
    }

    fn title_for(&self, key: &str) -> String {
        let base = self.panels.get(key).map(|p| p.title()).unwrap_or(key);
        format!("{base}{}", self.config.title_suffix)
    }
}

/// The configured default when it names a panel, else the first panel.
fn fallback_key(panels: &PanelSet, configured: Option<&str>) -> Option<String> {
    if let Some(key) = configured {
        if panels.contains(key) {
            return Some(key.to_string());
        }
        tracing::warn!("default panel {key} is not in the set; using the first panel");
    }
    panels.first().map(|p| p.key().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::history::InMemoryHistory;
    use crate::nav::panel::Panel;
    use crate::nav::render::{RecordingRenderer, RenderOp};

    type Controller = NavigationController<InMemoryHistory, RecordingRenderer>;

    fn panels() -> PanelSet {
        PanelSet::new(vec![
            Panel::new("overview", "Overview"),
            Panel::new("pricing", "Pricing"),
            Panel::new("support", "Support").lazy(),
        ])
        .unwrap()
    }

    fn location(suffix: &str) -> Url {
        Url::parse(&format!("https://example.com/tour{suffix}")).unwrap()
    }

    fn controller_at(suffix: &str, config: NavigationConfig) -> Controller {
        NavigationController::new(
            panels(),
            config,
            InMemoryHistory::new(location(suffix)),
            RecordingRenderer::new(),
        )
    }

    fn animated() -> NavigationConfig {
        NavigationConfig {
            animate: true,
            ..NavigationConfig::default()
        }
    }

    #[test]
    fn initial_selection_from_query_bookmark() {
        let ctl = controller_at("?tab=pricing", NavigationConfig::default());
        assert_eq!(ctl.selected_key(), Some("pricing"));
        assert_eq!(ctl.state().origin(), SelectionOrigin::Initial);
        assert_eq!(ctl.panels().visible().unwrap().key(), "pricing");
    }

    #[test]
    fn initial_selection_falls_back_to_configured_default() {
        let config = NavigationConfig {
            default_key: Some("support".to_string()),
            ..NavigationConfig::default()
        };
        let ctl = controller_at("?tab=bogus", config);
        assert_eq!(ctl.selected_key(), Some("support"));
    }

    #[test]
    fn unknown_default_uses_first_panel() {
        let config = NavigationConfig {
            default_key: Some("missing".to_string()),
            ..NavigationConfig::default()
        };
        let ctl = controller_at("", config);
        assert_eq!(ctl.selected_key(), Some("overview"));
    }

    #[test]
    fn initial_render_hides_then_shows_without_history() {
        let ctl = controller_at("", NavigationConfig::default());
        assert_eq!(
            ctl.renderer().ops(),
            &[
                RenderOp::HideAll,
                RenderOp::Show("overview".to_string()),
                RenderOp::SetTitle("Overview".to_string()),
            ]
        );
        assert_eq!(ctl.history().push_count(), 0);
        assert_eq!(ctl.history().replace_count(), 0);
    }

    #[test]
    fn fragment_style_reads_hash_bang() {
        let config = NavigationConfig {
            bookmark: crate::config::settings::BookmarkKind::Fragment,
            ..NavigationConfig::default()
        };
        let ctl = controller_at("#!support", config);
        assert_eq!(ctl.selected_key(), Some("support"));
    }

    #[test]
    fn empty_panel_set_has_no_selection() {
        let mut ctl = NavigationController::new(
            PanelSet::empty(),
            NavigationConfig::default(),
            InMemoryHistory::new(location("?tab=overview")),
            RecordingRenderer::new(),
        );
        assert!(ctl.selected_key().is_none());
        assert!(ctl.renderer().ops().is_empty());
        assert!(!ctl.select_by_key("overview"));
        assert!(!ctl.select_next());
        assert!(ctl.bookmark_href().is_none());
    }

    #[test]
    fn replace_mode_overwrites_current_entry() {
        let config = NavigationConfig {
            history_mode: HistoryMode::Replace,
            ..NavigationConfig::default()
        };
        let mut ctl = controller_at("", config);
        ctl.select_by_key("pricing");
        ctl.select_by_key("support");

        assert_eq!(ctl.history().push_count(), 0);
        assert_eq!(ctl.history().replace_count(), 2);
        assert_eq!(ctl.history().timeline().entry_count(), 1);
    }

    #[test]
    fn history_title_carries_suffix() {
        let config = NavigationConfig {
            title_suffix: " | Example".to_string(),
            ..NavigationConfig::default()
        };
        let mut ctl = controller_at("", config);
        ctl.select_by_key("pricing");
        assert_eq!(ctl.history().current().title, "Pricing | Example");
    }

    #[test]
    fn reselecting_current_key_is_noop() {
        let mut ctl = controller_at("", NavigationConfig::default());
        assert!(!ctl.select_by_key("overview"));
        assert_eq!(ctl.history().push_count(), 0);
        assert!(ctl.drain_events().is_empty());
    }

    #[test]
    fn next_and_previous_walk_in_order() {
        let mut ctl = controller_at("", NavigationConfig::default());
        assert!(!ctl.select_previous());
        assert!(ctl.select_next());
        assert_eq!(ctl.selected_key(), Some("pricing"));
        assert!(ctl.select_next());
        assert!(!ctl.select_next());
        assert!(ctl.select_previous());
        assert_eq!(ctl.selected_key(), Some("pricing"));
        assert_eq!(ctl.history().push_count(), 3);
    }

    #[test]
    fn history_event_uses_url_when_state_missing() {
        let mut ctl = controller_at("", NavigationConfig::default());
        ctl.select_by_key("support");
        let event = HistoryEvent {
            state: None,
            url: location("?tab=pricing"),
        };
        assert!(ctl.on_history_change(&event));
        assert_eq!(ctl.selected_key(), Some("pricing"));
        assert_eq!(ctl.state().origin(), SelectionOrigin::History);
    }

    #[test]
    fn history_event_without_key_returns_to_default() {
        let mut ctl = controller_at("", NavigationConfig::default());
        ctl.select_by_key("support");
        let event = HistoryEvent {
            state: None,
            url: location(""),
        };
        assert!(ctl.on_history_change(&event));
        assert_eq!(ctl.selected_key(), Some("overview"));
    }

    #[test]
    fn history_event_for_current_key_changes_nothing() {
        let mut ctl = controller_at("", NavigationConfig::default());
        ctl.drain_events();
        let event = HistoryEvent {
            state: Some(HistoryState::for_key("overview")),
            url: location("?tab=overview"),
        };
        assert!(!ctl.on_history_change(&event));
        assert!(ctl.drain_events().is_empty());
    }

    #[test]
    fn animated_selection_waits_for_completion() {
        let mut ctl = controller_at("", animated());
        ctl.select_by_key("pricing");

        assert!(ctl.is_transitioning());
        assert_eq!(ctl.selected_key(), Some("pricing"));
        assert!(ctl.renderer().on_screen().is_none());

        ctl.animation_complete();
        assert_eq!(ctl.phase(), &Phase::Idle);
        assert_eq!(ctl.renderer().on_screen(), Some("pricing"));
    }

    #[test]
    fn queued_selection_back_to_target_is_dropped() {
        let mut ctl = controller_at("", animated());
        ctl.select_by_key("pricing");
        ctl.select_by_key("support");
        ctl.select_by_key("pricing");
        assert_eq!(
            ctl.phase(),
            &Phase::Transitioning {
                target: "pricing".to_string(),
                queued: None
            }
        );
        ctl.animation_complete();
        assert_eq!(ctl.renderer().on_screen(), Some("pricing"));
    }

    #[test]
    fn animation_complete_while_idle_is_ignored() {
        let mut ctl = controller_at("", animated());
        let before = ctl.renderer().ops().len();
        ctl.animation_complete();
        assert_eq!(ctl.renderer().ops().len(), before);
    }

    #[test]
    fn lazy_panel_requests_body_on_show() {
        let mut ctl = controller_at("", NavigationConfig::default());
        ctl.drain_events();
        ctl.select_by_key("support");

        let events = ctl.drain_events();
        let request = events
            .iter()
            .find_map(|e| match e {
                Event::BodyRequested(req) => Some(req.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(request.key, "support");

        ctl.on_body_loaded(&request, Ok("<p>help</p>".to_string()));
        assert_eq!(ctl.panels().get("support").unwrap().body(), Some("<p>help</p>"));
        assert_eq!(
            ctl.renderer().ops().last(),
            Some(&RenderOp::InjectBody("support".to_string()))
        );

        // Shown again with a body: no new fetch.
        ctl.select_by_key("overview");
        ctl.select_by_key("support");
        assert!(!ctl
            .drain_events()
            .iter()
            .any(|e| matches!(e, Event::BodyRequested(_))));
    }

    #[test]
    fn stale_body_is_stored_but_not_injected() {
        let mut ctl = controller_at("", NavigationConfig::default());
        ctl.select_by_key("support");
        let request = FetchRequest {
            key: "support".to_string(),
            generation: ctl.generation,
        };
        ctl.select_by_key("pricing");

        ctl.on_body_loaded(&request, Ok("<p>late</p>".to_string()));
        assert_eq!(ctl.panels().get("support").unwrap().body(), Some("<p>late</p>"));
        assert!(!ctl
            .renderer()
            .ops()
            .contains(&RenderOp::InjectBody("support".to_string())));
    }

    #[test]
    fn failed_fetch_keeps_panel_visible_and_reports() {
        let mut ctl = controller_at("", NavigationConfig::default());
        ctl.select_by_key("support");
        let request = FetchRequest {
            key: "support".to_string(),
            generation: ctl.generation,
        };
        ctl.drain_events();

        let error = RenderError::Fetch {
            key: "support".to_string(),
            reason: "timeout".to_string(),
        };
        ctl.on_body_loaded(&request, Err(error.clone()));

        assert_eq!(ctl.panels().visible().unwrap().key(), "support");
        assert!(ctl.panels().get("support").unwrap().body().is_none());
        assert_eq!(
            ctl.drain_events(),
            vec![Event::RenderFailed {
                key: "support".to_string(),
                error
            }]
        );
    }

    #[test]
    fn dispatch_routes_commands() {
        let mut ctl = controller_at("", animated());
        ctl.dispatch(Command::Select("pricing".to_string()));
        ctl.dispatch(Command::AnimationComplete);
        ctl.dispatch(Command::SelectNext);
        ctl.dispatch(Command::AnimationComplete);
        assert_eq!(ctl.renderer().on_screen(), Some("support"));

        ctl.dispatch(Command::SelectPrevious);
        ctl.dispatch(Command::AnimationComplete);
        assert_eq!(ctl.selected_key(), Some("pricing"));

        ctl.dispatch(Command::SelectNext);
        let generation = ctl.generation();
        ctl.dispatch(Command::AnimationElapsed {
            generation: generation - 1,
        });
        assert!(ctl.is_transitioning());
        ctl.dispatch(Command::AnimationElapsed { generation });
        assert_eq!(ctl.renderer().on_screen(), Some("support"));
    }

    #[test]
    fn bookmark_href_reflects_selection() {
        let mut ctl = controller_at("?lang=en", NavigationConfig::default());
        ctl.select_by_key("support");
        assert_eq!(
            ctl.bookmark_href().unwrap().as_str(),
            "https://example.com/tour?lang=en&tab=support"
        );
    }

    #[test]
    fn into_parts_returns_collaborators() {
        let mut ctl = controller_at("", NavigationConfig::default());
        ctl.select_by_key("pricing");
        let (history, renderer) = ctl.into_parts();
        assert_eq!(history.push_count(), 1);
        assert_eq!(renderer.on_screen(), Some("pricing"));
    }

    #[test]
    fn late_timer_does_not_end_newer_transition() {
        let mut ctl = controller_at("", animated());
        ctl.select_by_key("pricing");
        let first = ctl.generation();
        ctl.animation_complete();
        ctl.select_by_key("support");

        assert!(!ctl.animation_elapsed(first));
        assert!(ctl.is_transitioning());

        assert!(ctl.animation_elapsed(ctl.generation()));
        assert_eq!(ctl.renderer().on_screen(), Some("support"));
    }

    #[test]
    fn transition_started_carries_generation() {
        let mut ctl = controller_at("", animated());
        ctl.drain_events();
        ctl.select_by_key("pricing");
        let generation = ctl.generation();
        assert!(ctl.drain_events().contains(&Event::TransitionStarted {
            key: "pricing".to_string(),
            generation,
        }));
    }

    #[test]
    fn history_change_while_transitioning_only_queues() {
        let mut ctl = controller_at("", animated());
        ctl.select_by_key("pricing");
        let pushes = ctl.history().push_count();

        let event = HistoryEvent {
            state: Some(HistoryState::for_key("support")),
            url: location("?tab=support"),
        };
        assert!(ctl.on_history_change(&event));
        assert_eq!(ctl.history().push_count(), pushes);
        assert_eq!(ctl.history().replace_count(), 0);
        assert_eq!(
            ctl.phase(),
            &Phase::Transitioning {
                target: "pricing".to_string(),
                queued: Some("support".to_string())
            }
        );

        ctl.animation_complete();
        ctl.animation_complete();
        assert_eq!(ctl.renderer().on_screen(), Some("support"));
        assert_eq!(ctl.history().push_count(), pushes);
    }

    #[test]
    fn prefetch_requests_every_unloaded_body_once() {
        let panels = PanelSet::new(vec![
            Panel::new("overview", "Overview").lazy(),
            Panel::new("pricing", "Pricing").with_body("<p>$</p>").lazy(),
            Panel::new("support", "Support").lazy(),
        ])
        .unwrap();
        let config = NavigationConfig {
            prefetch: true,
            ..NavigationConfig::default()
        };
        let mut ctl = NavigationController::new(
            panels,
            config,
            InMemoryHistory::new(location("")),
            RecordingRenderer::new(),
        );

        let requested: Vec<String> = ctl
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                Event::BodyRequested(req) => Some(req.key),
                _ => None,
            })
            .collect();
        assert_eq!(requested, vec!["overview".to_string(), "support".to_string()]);
    }

    #[test]
    fn prefetched_body_is_used_without_refetch() {
        let config = NavigationConfig {
            prefetch: true,
            ..NavigationConfig::default()
        };
        let mut ctl = controller_at("", config);
        let request = ctl
            .drain_events()
            .into_iter()
            .find_map(|e| match e {
                Event::BodyRequested(req) => Some(req),
                _ => None,
            })
            .unwrap();
        assert_eq!(request.key, "support");

        ctl.on_body_loaded(&request, Ok("<p>help</p>".to_string()));
        ctl.drain_events();
        ctl.select_by_key("support");
        assert!(!ctl
            .drain_events()
            .iter()
            .any(|e| matches!(e, Event::BodyRequested(_))));
        assert_eq!(
            ctl.renderer().ops().last(),
            Some(&RenderOp::SetTitle("Support".to_string()))
        );
    }

    #[test]
    fn no_prefetch_by_default() {
        let mut ctl = controller_at("", NavigationConfig::default());
        assert!(!ctl
            .drain_events()
            .iter()
            .any(|e| matches!(e, Event::BodyRequested(_))));
    }

    #[test]
    fn path_style_selects_from_pathname() {
        let config = NavigationConfig {
            bookmark: crate::config::settings::BookmarkKind::Path,
            path_base: "/tour/".to_string(),
            ..NavigationConfig::default()
        };
        let mut ctl = NavigationController::new(
            panels(),
            config,
            InMemoryHistory::new(Url::parse("https://example.com/tour/pricing").unwrap()),
            RecordingRenderer::new(),
        );
        assert_eq!(ctl.selected_key(), Some("pricing"));

        ctl.select_by_key("support");
        assert_eq!(
            ctl.history().current().url.as_str(),
            "https://example.com/tour/support"
        );
    }
}
