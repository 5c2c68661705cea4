//! Local file port used by import and export.

use std::future::Future;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Errors raised by the file store.
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    /// The file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The content could not be encoded for writing.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Reads and writes UTF-8 documents on the local machine.
pub trait FileStore: Send + Sync {
    /// Reads a whole file as text.
    ///
    /// # Errors
    ///
    /// Returns `FileStoreError::NotFound` if the file does not exist.
    fn read_text(&self, path: &Path) -> impl Future<Output = Result<String, FileStoreError>> + Send;

    /// Writes a JSON document as pretty-printed text (2-space indent,
    /// trailing newline), replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_json(
        &self,
        path: &Path,
        document: &Value,
    ) -> impl Future<Output = Result<(), FileStoreError>> + Send;
}
