//! Backend REST adapter using reqwest.
//!
//! Implements the `ApiBackend` port against the backend's JSON API. Every
//! call is a single attempt with bearer authentication.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use courier_application::ports::{ApiBackend, AuthToken, BackendError};
use courier_domain::{
    Collection, CollectionItem, EntityId, Environment, HistoryItem, NewEnvironment, ProxyResponse,
    ResolvedRequest, StorableRequest,
};

use crate::config::ClientConfig;

/// `ApiBackend` implementation over HTTP.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct NewItem<'a> {
    request: &'a StorableRequest,
}

impl RestBackend {
    /// Creates a backend client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self::with_client(client, config.backend_url.clone()))
    }

    /// Creates a backend client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Appends `segments` to the base URL, keeping any base path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::Network(format!("cannot build URL on {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: &AuthToken,
    ) -> Result<RequestBuilder, BackendError> {
        self.request_as(method, segments, Some(token))
    }

    fn request_as(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&AuthToken>,
    ) -> Result<RequestBuilder, BackendError> {
        let url = self.endpoint(segments)?;
        debug!(%method, path = url.path(), signed_in = token.is_some(), "backend call");
        let builder = self.client.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        })
    }

    /// Sends the request and parses the body as JSON, whatever the status.
    async fn send(builder: RequestBuilder) -> Result<(StatusCode, Value), BackendError> {
        let response = builder.send().await.map_err(map_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_error)?;

        let value = serde_json::from_str(&text).map_err(|_| {
            BackendError::Network(format!("backend answered HTTP {status} without JSON"))
        })?;
        Ok((status, value))
    }

    /// Like `send`, but an `{error}` document or a failing status is an error.
    async fn send_api(builder: RequestBuilder, what: &str) -> Result<Value, BackendError> {
        let (status, value) = Self::send(builder).await?;

        if let Some(message) = error_message(&value) {
            return Err(BackendError::Rejected(message));
        }
        if !status.is_success() {
            debug!(%status, what, "backend call failed without an error message");
            return Err(BackendError::UnexpectedShape(what.to_string()));
        }
        Ok(value)
    }

    async fn list<T: DeserializeOwned>(
        builder: RequestBuilder,
        what: &str,
    ) -> Result<Vec<T>, BackendError> {
        let value = Self::send_api(builder, what).await?;
        if !value.is_array() {
            return Err(BackendError::UnexpectedShape(what.to_string()));
        }
        decode(value, what)
    }
}

#[async_trait]
impl ApiBackend for RestBackend {
    async fn proxy(
        &self,
        request: &ResolvedRequest,
        token: Option<&AuthToken>,
    ) -> Result<ProxyResponse, BackendError> {
        let builder = self.request_as(Method::POST, &["proxy"], token)?.json(request);
        let (_, value) = Self::send(builder).await?;

        ProxyResponse::from_value(value).map_err(|e| {
            debug!(error = %e, "proxy answer not understood");
            BackendError::UnexpectedShape("proxy".to_string())
        })
    }

    async fn history(&self, token: &AuthToken) -> Result<Vec<HistoryItem>, BackendError> {
        Self::list(self.request(Method::GET, &["history"], token)?, "history").await
    }

    async fn delete_history(&self, id: &EntityId, token: &AuthToken) -> Result<(), BackendError> {
        let builder = self.request(Method::DELETE, &["history", id.as_str()], token)?;
        Self::send_api(builder, "history").await.map(drop)
    }

    async fn collections(&self, token: &AuthToken) -> Result<Vec<Collection>, BackendError> {
        Self::list(self.request(Method::GET, &["collections"], token)?, "collections").await
    }

    async fn create_collection(
        &self,
        name: &str,
        token: &AuthToken,
    ) -> Result<Collection, BackendError> {
        let builder = self
            .request(Method::POST, &["collections"], token)?
            .json(&json!({ "name": name }));
        decode(Self::send_api(builder, "collections").await?, "collections")
    }

    async fn delete_collection(
        &self,
        id: &EntityId,
        token: &AuthToken,
    ) -> Result<(), BackendError> {
        let builder = self.request(Method::DELETE, &["collections", id.as_str()], token)?;
        Self::send_api(builder, "collections").await.map(drop)
    }

    async fn collection_items(
        &self,
        collection_id: &EntityId,
        token: &AuthToken,
    ) -> Result<Vec<CollectionItem>, BackendError> {
        let builder = self.request(
            Method::GET,
            &["collections", collection_id.as_str(), "items"],
            token,
        )?;
        Self::list(builder, "collection").await
    }

    async fn add_to_collection(
        &self,
        collection_id: &EntityId,
        request: &StorableRequest,
        token: &AuthToken,
    ) -> Result<CollectionItem, BackendError> {
        let builder = self
            .request(
                Method::POST,
                &["collections", collection_id.as_str(), "items"],
                token,
            )?
            .json(&NewItem { request });
        decode(Self::send_api(builder, "collection").await?, "collection")
    }

    async fn delete_collection_item(
        &self,
        id: &EntityId,
        token: &AuthToken,
    ) -> Result<(), BackendError> {
        let builder =
            self.request(Method::DELETE, &["collections", "items", id.as_str()], token)?;
        Self::send_api(builder, "collection").await.map(drop)
    }

    async fn environments(&self, token: &AuthToken) -> Result<Vec<Environment>, BackendError> {
        Self::list(self.request(Method::GET, &["env"], token)?, "environments").await
    }

    async fn create_environment(
        &self,
        environment: &NewEnvironment,
        token: &AuthToken,
    ) -> Result<Environment, BackendError> {
        let builder = self.request(Method::POST, &["env"], token)?.json(environment);
        decode(Self::send_api(builder, "environments").await?, "environments")
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, BackendError> {
    serde_json::from_value(value).map_err(|e| {
        debug!(error = %e, what, "backend document not understood");
        BackendError::UnexpectedShape(what.to_string())
    })
}

/// Extracts the message of an `{error}` document. Empty, `null` and `false`
/// values do not count as errors.
fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn map_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::Network("backend did not answer in time".to_string())
    } else if error.is_connect() {
        BackendError::Network(format!("cannot reach backend: {error}"))
    } else {
        BackendError::Network(error.to_string())
    }
}
