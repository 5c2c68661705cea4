//! Save to collection use case.

use courier_domain::{CollectionItem, EntityId, RequestTemplate, StorableRequest};
use tracing::info;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{ApiBackend, AuthToken};

/// Saves the unresolved template into the open collection.
pub struct SaveToCollection<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> SaveToCollection<'a, B> {
    /// Creates a new `SaveToCollection` use case.
    #[must_use]
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Saves `template` into `collection`.
    ///
    /// Placeholders are stored as written so the saved request keeps working
    /// across environments.
    ///
    /// # Errors
    ///
    /// - `NoCollectionSelected` when `collection` is `None`
    /// - `Domain(InvalidBody)` for a body that is not JSON
    /// - `Backend` if the backend rejects the item
    pub async fn execute(
        &self,
        collection: Option<&EntityId>,
        template: &RequestTemplate,
        token: &AuthToken,
    ) -> ApplicationResult<CollectionItem> {
        let collection = collection.ok_or(ApplicationError::NoCollectionSelected)?;
        let request = StorableRequest::from_template(template)?;

        let item = self
            .backend
            .add_to_collection(collection, &request, token)
            .await?;

        info!(collection = %collection, item = %item.id, "request saved");
        Ok(item)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_support::{MockBackend, token};
    use courier_domain::{DomainError, HttpMethod};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_save_keeps_placeholders() {
        let backend = MockBackend::new().with_collection("c1", "Users");
        let template =
            RequestTemplate::new(HttpMethod::Post, "{{base}}/users").with_body("{\"a\": 1}");

        let item = SaveToCollection::new(&backend)
            .execute(Some(&EntityId::new("c1")), &template, &token())
            .await
            .unwrap();

        assert_eq!(item.url(), "{{base}}/users");
        assert_eq!(item.method(), HttpMethod::Post);
        assert_eq!(item.to_template().body, "{\n  \"a\": 1\n}");
        assert_eq!(backend.items.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn test_requires_collection() {
        let backend = MockBackend::new();
        let result = SaveToCollection::new(&backend)
            .execute(None, &RequestTemplate::default(), &token())
            .await;
        assert!(matches!(result, Err(ApplicationError::NoCollectionSelected)));
    }

    #[tokio::test]
    async fn test_invalid_body_not_saved() {
        let backend = MockBackend::new().with_collection("c1", "Users");
        let template = RequestTemplate::new(HttpMethod::Post, "u").with_body("{");

        let result = SaveToCollection::new(&backend)
            .execute(Some(&EntityId::new("c1")), &template, &token())
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::InvalidBody(_)))
        ));
        assert!(backend.items.lock().expect("lock").is_empty());
    }
}
