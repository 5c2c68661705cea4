//! Import request use case.

use std::path::Path;

use courier_domain::{RequestTemplate, from_imported};
use serde_json::Value;
use tracing::info;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::FileStore;

/// Reads a request file produced by export (or written by hand).
pub struct ImportRequest<'a, F: FileStore> {
    files: &'a F,
}

impl<'a, F: FileStore> ImportRequest<'a, F> {
    /// Creates a new `ImportRequest` use case.
    #[must_use]
    pub const fn new(files: &'a F) -> Self {
        Self { files }
    }

    /// Reads `path` and builds a template from it.
    ///
    /// # Errors
    ///
    /// - `FileAccess` if the file cannot be read
    /// - `UnreadableFile` if it is not JSON
    /// - `Domain(MalformedImport)` if `url` or `method` is missing or invalid
    pub async fn execute(&self, path: &Path) -> ApplicationResult<RequestTemplate> {
        let text = self.files.read_text(path).await?;
        let json: Value = serde_json::from_str(&text)
            .map_err(|e| ApplicationError::UnreadableFile(e.to_string()))?;
        let template = from_imported(&json)?;

        info!(path = %path.display(), method = %template.method, "request imported");
        Ok(template)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::FileStoreError;
    use crate::test_support::MemoryFileStore;
    use courier_domain::{DomainError, HttpMethod, KeyValueList, KeyValuePair};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_import_exported_file() {
        let files = MemoryFileStore::new().with_file(
            "req.json",
            r#"{
  "method": "PUT",
  "url": "{{base}}/users/1",
  "headers": [{"key": "X-Trace", "value": "1"}],
  "params": {"dry": "true"},
  "body": {"name": "ada"},
  "exportedAt": "2024-05-01T12:00:00Z"
}"#,
        );

        let template = ImportRequest::new(&files)
            .execute(Path::new("req.json"))
            .await
            .unwrap();

        assert_eq!(template.method, HttpMethod::Put);
        assert_eq!(template.url, "{{base}}/users/1");
        assert_eq!(template.headers.all(), &[KeyValuePair::new("X-Trace", "1")]);
        assert_eq!(template.params.all(), &[KeyValuePair::new("dry", "true")]);
        assert_eq!(template.body, "{\n  \"name\": \"ada\"\n}");
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let files = MemoryFileStore::new().with_file("req.json", "{}");
        let result = ImportRequest::new(&files).execute(Path::new("req.json")).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::MalformedImport(_)))
        ));
    }

    #[tokio::test]
    async fn test_not_json() {
        let files = MemoryFileStore::new().with_file("req.json", "method: GET");
        let result = ImportRequest::new(&files).execute(Path::new("req.json")).await;
        assert!(matches!(result, Err(ApplicationError::UnreadableFile(_))));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let files = MemoryFileStore::new();
        let result = ImportRequest::new(&files).execute(Path::new("nope.json")).await;
        assert!(matches!(
            result,
            Err(ApplicationError::FileAccess(FileStoreError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_defaults_for_optional_fields() {
        let files =
            MemoryFileStore::new().with_file("req.json", r#"{"url": "https://x", "method": "GET"}"#);
        let template = ImportRequest::new(&files)
            .execute(Path::new("req.json"))
            .await
            .unwrap();
        assert_eq!(template.headers, KeyValueList::blank());
        assert_eq!(template.body, "");
    }
}
