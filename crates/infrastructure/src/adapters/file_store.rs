//! Local file store using `tokio::fs`.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tokio::fs;
use tracing::debug;

use courier_application::ports::{FileStore, FileStoreError};

use crate::serialization::to_json_stable;

/// `FileStore` backed by the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileStore;

impl TokioFileStore {
    /// Creates a new `TokioFileStore`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileStore for TokioFileStore {
    async fn read_text(&self, path: &Path) -> Result<String, FileStoreError> {
        fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FileStoreError::NotFound(path.to_path_buf())
            } else {
                FileStoreError::Io(e)
            }
        })
    }

    async fn write_json(&self, path: &Path, document: &Value) -> Result<(), FileStoreError> {
        let text = to_json_stable(document).map_err(|e| FileStoreError::Encoding(e.to_string()))?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, text).await?;
        debug!(path = %path.display(), "file written");
        Ok(())
    }
}
