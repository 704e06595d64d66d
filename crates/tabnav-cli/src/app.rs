//! Host application state.
//!
//! [`App`] owns the controller for the single region the CLI drives, turns
//! input lines into controller calls, and starts the asynchronous work the
//! controller asks for (body fetches, animation timers). Background tasks
//! and history notifications come back as [`Command`]s on one channel.

use std::sync::Arc;
use std::time::Duration;

use tabnav_core::{
    BodyFetcher, Command, Event, FetchRequest, HistoryAdapter, InMemoryHistory,
    NavigationController,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::input::{InputAction, HELP};
use crate::page::{describe, Page};
use crate::render::TextRenderer;

/// How long a panel fade takes before the transition completes.
pub const ANIMATION: Duration = Duration::from_millis(200);

/// Whether the main loop should keep going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    controller: NavigationController<InMemoryHistory, TextRenderer>,
    fetcher: Arc<dyn BodyFetcher>,
    tx: UnboundedSender<Command>,
    page: Page,
    output: Vec<String>,
}

impl App {
    pub fn new(
        controller: NavigationController<InMemoryHistory, TextRenderer>,
        fetcher: Arc<dyn BodyFetcher>,
        tx: UnboundedSender<Command>,
        page: Page,
    ) -> Self {
        Self {
            controller,
            fetcher,
            tx,
            page,
            output: Vec::new(),
        }
    }

    pub fn controller_mut(&mut self) -> &mut NavigationController<InMemoryHistory, TextRenderer> {
        &mut self.controller
    }

    /// Runs one input line against the controller.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        match crate::input::parse_line(line) {
            InputAction::Select(key) => {
                if self.controller.panels().contains(&key) {
                    self.controller.dispatch(Command::Select(key));
                } else {
                    self.output.push(format!("no panel named {key:?}"));
                }
            }
            InputAction::Next => self.controller.dispatch(Command::SelectNext),
            InputAction::Previous => self.controller.dispatch(Command::SelectPrevious),
            InputAction::Back => {
                if !self.controller.history_mut().back() {
                    self.output.push("already at the first history entry".to_string());
                }
            }
            InputAction::Forward => {
                if !self.controller.history_mut().forward() {
                    self.output.push("already at the last history entry".to_string());
                }
            }
            InputAction::Scroll(px) => {
                let (position, section) = self.page.scroll_to(px);
                self.output.push(describe(position));
                if let Some(key) = section {
                    self.controller.dispatch(Command::Select(key.to_string()));
                }
            }
            InputAction::Done => self.controller.dispatch(Command::AnimationComplete),
            InputAction::State => match serde_json::to_string(self.controller.state()) {
                Ok(json) => self.output.push(json),
                Err(e) => tracing::error!("failed to serialise state: {e}"),
            },
            InputAction::Link => {
                let link = self
                    .controller
                    .bookmark_href()
                    .unwrap_or_else(|| self.controller.history().location());
                self.output.push(link.to_string());
            }
            InputAction::List => {
                let selected = self.controller.selected_key().map(str::to_string);
                for panel in self.controller.panels().iter() {
                    let marker = if selected.as_deref() == Some(panel.key()) {
                        '*'
                    } else {
                        ' '
                    };
                    self.output.push(format!("{marker} {:<16} {}", panel.key(), panel.title()));
                }
            }
            InputAction::Help => self.output.push(HELP.to_string()),
            InputAction::Quit => return Flow::Quit,
            InputAction::Nothing => {}
            InputAction::Unknown(input) => {
                self.output.push(format!("unknown command: {input} (try help)"));
            }
        }
        Flow::Continue
    }

    /// Applies a command from a background task or the history adapter.
    pub fn handle_command(&mut self, command: Command) {
        self.controller.dispatch(command);
    }

    /// Drains controller events, starting any work they call for, and
    /// returns everything that should be printed.
    pub fn pump(&mut self) -> Vec<String> {
        for event in self.controller.drain_events() {
            match &event {
                Event::BodyRequested(request) => self.spawn_fetch(request.clone()),
                Event::TransitionStarted { generation, .. } => self.spawn_animation(*generation),
                Event::RenderFailed { key, error } => {
                    self.output.push(format!("!! {key}: {error}"));
                }
                _ => {}
            }
            tracing::debug!("controller event: {event:?}");
        }
        let mut lines = self.controller.renderer_mut().take_lines();
        lines.append(&mut self.output);
        lines
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch_body(&request.key).await;
            let _ = tx.send(Command::BodyLoaded { request, result });
        });
    }

    fn spawn_animation(&self, generation: u64) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ANIMATION).await;
            let _ = tx.send(Command::AnimationElapsed { generation });
        });
    }
}
