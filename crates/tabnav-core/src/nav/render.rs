//! Rendering seam between the controller and the visible surface.
//!
//! [`PanelRenderer`] reflects the controller's decisions; it is handed
//! read-only [`Panel`] references and never changes the selection itself.
//! [`BodyFetcher`] is the optional capability for panels whose content is
//! loaded on first show.

use async_trait::async_trait;

use crate::error::RenderError;
use crate::nav::panel::Panel;

/// Shows and hides panels on the host surface.
pub trait PanelRenderer {
    /// Hides every panel of the region.
    fn hide_all(&mut self);
    /// Makes `panel` the visible one.
    fn show(&mut self, panel: &Panel);
    /// Replaces the visible content of `panel` with its freshly loaded body.
    fn inject_body(&mut self, panel: &Panel);
    /// Updates the document title. Hosts without one ignore it.
    fn set_title(&mut self, _title: &str) {}
}

/// Loads panel bodies asynchronously.
#[async_trait]
pub trait BodyFetcher: Send + Sync {
    async fn fetch_body(&self, key: &str) -> Result<String, RenderError>;
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    HideAll,
    Show(String),
    InjectBody(String),
    SetTitle(String),
}

/// A [`PanelRenderer`] that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    ops: Vec<RenderOp>,
}

impl RecordingRenderer {
    /// Creates a renderer with no recorded operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every operation in call order.
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Keys passed to `show`, in call order.
    pub fn shown(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                RenderOp::Show(key) => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The key of the most recent `show` not followed by `hide_all`.
    pub fn on_screen(&self) -> Option<&str> {
        for op in self.ops.iter().rev() {
            match op {
                RenderOp::Show(key) => return Some(key.as_str()),
                RenderOp::HideAll => return None,
                _ => {}
            }
        }
        None
    }

    /// Forgets the recorded operations.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl PanelRenderer for RecordingRenderer {
    fn hide_all(&mut self) {
        self.ops.push(RenderOp::HideAll);
    }

    fn show(&mut self, panel: &Panel) {
        self.ops.push(RenderOp::Show(panel.key().to_string()));
    }

    fn inject_body(&mut self, panel: &Panel) {
        self.ops.push(RenderOp::InjectBody(panel.key().to_string()));
    }

    fn set_title(&mut self, title: &str) {
        self.ops.push(RenderOp::SetTitle(title.to_string()));
    }
}
