//! Backend API port
//!
//! The backend proxies requests to their targets and owns history,
//! collections and environments. Every call is a single attempt.

use std::fmt;

use async_trait::async_trait;

use courier_domain::{
    Collection, CollectionItem, EntityId, Environment, HistoryItem, NewEnvironment, ProxyResponse,
    ResolvedRequest, StorableRequest,
};

/// Errors that can occur when talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The backend is unreachable or answered with something that is not JSON.
    #[error("network failure: {0}")]
    Network(String),

    /// The backend answered with an `{error}` document. The message is shown
    /// to the user as is.
    #[error("{0}")]
    Rejected(String),

    /// The backend answered with valid JSON of the wrong shape.
    #[error("unexpected response from {0}")]
    UnexpectedShape(String),
}

/// Bearer token issued by the identity provider.
///
/// The value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token. Returns `None` for blank input.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Returns the raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Port for the backend REST API.
#[async_trait]
pub trait ApiBackend: Send + Sync {
    /// Sends a resolved request through the backend proxy.
    ///
    /// A proxy-level failure comes back as `Ok(ProxyResponse::Failure)`;
    /// `Err` is reserved for failures reaching the proxy itself. Without a
    /// token the call carries no `Authorization` header.
    async fn proxy(
        &self,
        request: &ResolvedRequest,
        token: Option<&AuthToken>,
    ) -> Result<ProxyResponse, BackendError>;

    /// Lists past sends, newest first as ordered by the backend.
    async fn history(&self, token: &AuthToken) -> Result<Vec<HistoryItem>, BackendError>;

    /// Deletes one history entry.
    async fn delete_history(&self, id: &EntityId, token: &AuthToken) -> Result<(), BackendError>;

    /// Lists collections.
    async fn collections(&self, token: &AuthToken) -> Result<Vec<Collection>, BackendError>;

    /// Creates a collection.
    async fn create_collection(
        &self,
        name: &str,
        token: &AuthToken,
    ) -> Result<Collection, BackendError>;

    /// Deletes a collection and, on the backend, all of its items.
    async fn delete_collection(&self, id: &EntityId, token: &AuthToken)
    -> Result<(), BackendError>;

    /// Lists the items of one collection.
    async fn collection_items(
        &self,
        collection_id: &EntityId,
        token: &AuthToken,
    ) -> Result<Vec<CollectionItem>, BackendError>;

    /// Saves a request into a collection.
    async fn add_to_collection(
        &self,
        collection_id: &EntityId,
        request: &StorableRequest,
        token: &AuthToken,
    ) -> Result<CollectionItem, BackendError>;

    /// Deletes one collection item.
    async fn delete_collection_item(
        &self,
        id: &EntityId,
        token: &AuthToken,
    ) -> Result<(), BackendError>;

    /// Lists environments.
    async fn environments(&self, token: &AuthToken) -> Result<Vec<Environment>, BackendError>;

    /// Creates an environment.
    async fn create_environment(
        &self,
        environment: &NewEnvironment,
        token: &AuthToken,
    ) -> Result<Environment, BackendError>;
}
