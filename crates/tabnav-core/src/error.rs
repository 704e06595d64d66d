//! Error types for `tabnav-core`.
//!
//! Fallible setup operations return [`CoreResult<T>`], an alias for
//! `Result<T, CoreError>`. Navigation itself never fails: unknown keys are
//! ignored and an empty panel set simply yields no selection. Lazy content
//! loading has its own [`RenderError`], which is reported as an event rather
//! than propagated.

use std::path::PathBuf;

/// Unified error type for configuration and construction.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Two panels in the same set share a key.
    #[error("duplicate panel key: {0}")]
    DuplicateKey(String),

    /// A panel has an empty key, which no bookmark can carry.
    #[error("panel key must not be empty")]
    EmptyKey,

    /// A location string could not be parsed as an absolute URL.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `tabnav-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Failure to produce a lazily loaded panel body.
///
/// The panel stays visible with an empty body; the failure is surfaced
/// through [`crate::Event::RenderFailed`] and never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The content source answered but could not deliver the body.
    #[error("fetch failed for {key}: {reason}")]
    Fetch { key: String, reason: String },

    /// No content exists for the panel key.
    #[error("no content for panel: {0}")]
    NotFound(String),

    /// Reading the content failed at the I/O layer.
    #[error("io error: {0}")]
    Io(String),
}
