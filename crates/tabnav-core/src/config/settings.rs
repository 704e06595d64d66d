//! Navigation configuration loaded from a TOML file.
//!
//! The default configuration matches the values shown in `config/default.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::nav::bookmark::BookmarkStyle;
use crate::nav::panel::{Panel, PanelSet};

/// Top-level configuration for one navigation region.
///
/// All fields have sensible defaults so a region works without a config
/// file. Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `<key>.html` bodies for lazy panels.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub sticky: StickyConfig,
    #[serde(default)]
    pub panels: Vec<PanelConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            navigation: NavigationConfig::default(),
            sticky: StickyConfig::default(),
            panels: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Builds the configured panels in file order.
    ///
    /// # Errors
    ///
    /// [`CoreError::DuplicateKey`] if two `[[panels]]` share a key, or
    /// [`CoreError::EmptyKey`] if one has an empty key.
    pub fn panel_set(&self) -> CoreResult<PanelSet> {
        PanelSet::new(self.panels.iter().map(PanelConfig::to_panel).collect())
    }
}

/// Which part of the location carries the selected key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
    Fragment,
    #[default]
    Query,
    Path,
}

/// Whether user selections add history entries or overwrite the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    #[default]
    Push,
    Replace,
}

/// Selection, bookmarking, and transition behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub bookmark: BookmarkKind,
    #[serde(default = "default_param_name")]
    pub param_name: String,
    /// Written before fragment keys, e.g. `"!"` for `#!key`.
    #[serde(default)]
    pub fragment_prefix: String,
    /// Path that panel keys are appended to in `path` style, e.g. `"/tour/"`.
    #[serde(default = "default_path_base")]
    pub path_base: String,
    /// Selected when the location names no known panel. Falls back to the
    /// first panel when unset or unknown.
    #[serde(default)]
    pub default_key: Option<String>,
    #[serde(default)]
    pub history_mode: HistoryMode,
    /// Appended to panel titles for history entries and the document title.
    #[serde(default)]
    pub title_suffix: String,
    #[serde(default)]
    pub animate: bool,
    /// Request every lazy body at startup instead of on first show.
    #[serde(default)]
    pub prefetch: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            bookmark: BookmarkKind::default(),
            param_name: default_param_name(),
            fragment_prefix: String::new(),
            path_base: default_path_base(),
            default_key: None,
            history_mode: HistoryMode::default(),
            title_suffix: String::new(),
            animate: false,
            prefetch: false,
        }
    }
}

impl NavigationConfig {
    /// Returns the [`BookmarkStyle`] selected by `bookmark`.
    pub fn bookmark_style(&self) -> BookmarkStyle {
        match self.bookmark {
            BookmarkKind::Fragment => BookmarkStyle::Fragment {
                prefix: self.fragment_prefix.clone(),
            },
            BookmarkKind::Query => BookmarkStyle::Query {
                param: self.param_name.clone(),
            },
            BookmarkKind::Path => BookmarkStyle::path(&self.path_base),
        }
    }
}

/// Sticky navigation and scroll-spy tuning, in CSS pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickyConfig {
    /// How far above a section's top the scroll position may be and still
    /// count as inside it.
    #[serde(default = "default_spy_threshold")]
    pub spy_threshold: f64,
    /// Space kept between the nav bottom and the end-of-content marker.
    #[serde(default = "default_bottom_gap")]
    pub bottom_gap: f64,
}

impl Default for StickyConfig {
    fn default() -> Self {
        Self {
            spy_threshold: default_spy_threshold(),
            bottom_gap: default_bottom_gap(),
        }
    }
}

/// One `[[panels]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub lazy: bool,
}

impl PanelConfig {
    fn to_panel(&self) -> Panel {
        let panel = Panel::new(&self.key, &self.title);
        let panel = match &self.body {
            Some(body) => panel.with_body(body),
            None => panel,
        };
        if self.lazy {
            panel.lazy()
        } else {
            panel
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("panels")
}

fn default_param_name() -> String {
    "tab".to_string()
}

fn default_path_base() -> String {
    "/".to_string()
}

fn default_spy_threshold() -> f64 {
    20.0
}

fn default_bottom_gap() -> f64 {
    30.0
}
