//! History use cases.

use courier_domain::{EntityId, HistoryItem};
use tracing::{debug, info};

use crate::error::ApplicationResult;
use crate::ports::{ApiBackend, AuthToken};

/// Loads the request history.
pub struct LoadHistory<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> LoadHistory<'a, B> {
    /// Creates a new `LoadHistory` use case.
    #[must_use]
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Executes the use case.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the history cannot be fetched.
    pub async fn execute(&self, token: &AuthToken) -> ApplicationResult<Vec<HistoryItem>> {
        let history = self.backend.history(token).await?;
        debug!(count = history.len(), "history loaded");
        Ok(history)
    }
}

/// Deletes one history entry.
pub struct DeleteHistoryItem<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> DeleteHistoryItem<'a, B> {
    /// Creates a new `DeleteHistoryItem` use case.
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
        self.backend.delete_history(id, token).await?;
        info!(%id, "history item deleted");
        Ok(())
    }
}
