//! Export request use case.

use std::path::Path;

use courier_domain::{DomainError, ExportDocument, RequestTemplate};
use tracing::info;

use crate::error::ApplicationResult;
use crate::ports::{Clock, FileStore, FileStoreError};

/// Writes the current template to a JSON file.
pub struct ExportRequest<'a, F: FileStore, C: Clock> {
    files: &'a F,
    clock: &'a C,
}

impl<'a, F: FileStore, C: Clock> ExportRequest<'a, F, C> {
    /// Creates a new `ExportRequest` use case.
    #[must_use]
    pub const fn new(files: &'a F, clock: &'a C) -> Self {
        Self { files, clock }
    }

    /// Exports `template` to `path`.
    ///
    /// Nothing is written unless the URL is set and the body parses.
    ///
    /// # Errors
    ///
    /// - `Domain(MissingUrl)` for an empty URL
    /// - `Domain(InvalidBody)` for a body that is not JSON
    /// - `FileAccess` if the file cannot be written
    pub async fn execute(
        &self,
        template: &RequestTemplate,
        path: &Path,
    ) -> ApplicationResult<ExportDocument> {
        if template.url.trim().is_empty() {
            return Err(DomainError::MissingUrl.into());
        }

        let document = ExportDocument::from_template(template, self.clock.now())?;
        let json = serde_json::to_value(&document)
            .map_err(|e| FileStoreError::Encoding(e.to_string()))?;
        self.files.write_json(path, &json).await?;

        info!(path = %path.display(), "request exported");
        Ok(document)
    }
}
