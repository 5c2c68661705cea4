//! Collection use cases.

use courier_domain::{Collection, CollectionItem, EntityId};
use tracing::{debug, info};

use crate::error::ApplicationResult;
use crate::ports::{ApiBackend, AuthToken};

/// Loads the collection list.
pub struct LoadCollections<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> LoadCollections<'a, B> {
    /// Creates a new `LoadCollections` use case.
    #[must_use]
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Executes the use case.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the list cannot be fetched.
    pub async fn execute(&self, token: &AuthToken) -> ApplicationResult<Vec<Collection>> {
        let collections = self.backend.collections(token).await?;
        debug!(count = collections.len(), "collections loaded");
        Ok(collections)
    }
}

/// Creates an empty collection.
pub struct CreateCollection<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> CreateCollection<'a, B> {
    /// Creates a new `CreateCollection` use case.
    #[must_use]
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Executes the use case.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the backend rejects the collection.
    pub async fn execute(&self, name: &str, token: &AuthToken) -> ApplicationResult<Collection> {
        let collection = self.backend.create_collection(name, token).await?;
        info!(id = %collection.id, name = %collection.name, "collection created");
        Ok(collection)
    }
}

/// Deletes a collection together with its items.
pub struct DeleteCollection<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> DeleteCollection<'a, B> {
    /// Creates a new `DeleteCollection` use case.
    #[must_use]
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Executes the use case.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the backend refuses the deletion.
    pub async fn execute(&self, id: &EntityId, token: &AuthToken) -> ApplicationResult<()> {
        self.backend.delete_collection(id, token).await?;
        info!(%id, "collection deleted");
        Ok(())
    }
}

/// Loads the requests saved in one collection.
pub struct LoadCollectionItems<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> LoadCollectionItems<'a, B> {
    /// Creates a new `LoadCollectionItems` use case.
    #[must_use]
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Executes the use case.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the items cannot be fetched.
    pub async fn execute(
        &self,
        collection_id: &EntityId,
        token: &AuthToken,
    ) -> ApplicationResult<Vec<CollectionItem>> {
        let items = self.backend.collection_items(collection_id, token).await?;
        debug!(collection = %collection_id, count = items.len(), "collection items loaded");
        Ok(items)
    }
}

/// Deletes one saved request.
pub struct DeleteCollectionItem<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> DeleteCollectionItem<'a, B> {
    /// Creates a new `DeleteCollectionItem` use case.
    #[must_use]
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Executes the use case.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the backend refuses the deletion.
    pub async fn execute(&self, id: &EntityId, token: &AuthToken) -> ApplicationResult<()> {
        self.backend.delete_collection_item(id, token).await?;
        info!(%id, "collection item deleted");
        Ok(())
    }
}
