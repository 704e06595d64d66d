//! Plain-text panel renderer.
//!
//! Buffers what a browser would paint as lines of text; the main loop
//! flushes them to stdout after each command.

use tabnav_core::{Panel, PanelRenderer};

#[derive(Debug, Default)]
pub struct TextRenderer {
    lines: Vec<String>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the buffered lines, leaving the buffer empty.
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl PanelRenderer for TextRenderer {
    fn hide_all(&mut self) {
        self.lines.push("-- panels hidden".to_string());
    }

    fn show(&mut self, panel: &Panel) {
        self.lines.push(format!("== {} [{}]", panel.title(), panel.key()));
        match panel.body() {
            Some(body) => self.lines.push(body.to_string()),
            None if panel.is_lazy() => self.lines.push("(loading...)".to_string()),
            None => {}
        }
    }

    fn inject_body(&mut self, panel: &Panel) {
        if let Some(body) = panel.body() {
            self.lines.push(format!("-- loaded [{}]", panel.key()));
            self.lines.push(body.to_string());
        }
    }

    fn set_title(&mut self, title: &str) {
        self.lines.push(format!("-- title: {title}"));
    }
}
