//! File-backed lazy panel bodies.
//!
//! The body of panel `key` is read from `<content_dir>/<key>.html`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tabnav_core::{BodyFetcher, RenderError};

#[derive(Debug, Clone)]
pub struct FileBodyFetcher {
    root: PathBuf,
}

impl FileBodyFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        // Keys come from URLs; refuse anything that could leave the root.
        let safe = !key.is_empty()
            && Path::new(key).components().count() == 1
            && !key.contains(['/', '\\'])
            && key != ".."
            && key != ".";
        safe.then(|| self.root.join(format!("{key}.html")))
    }
}

#[async_trait]
impl BodyFetcher for FileBodyFetcher {
    async fn fetch_body(&self, key: &str) -> Result<String, RenderError> {
        let path = self
            .path_for(key)
            .ok_or_else(|| RenderError::NotFound(key.to_string()))?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => RenderError::NotFound(key.to_string()),
                _ => RenderError::Io(format!("{}: {e}", path.display())),
            })
    }
}
