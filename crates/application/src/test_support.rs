//! In-memory ports shared by the use case and session tests.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

use courier_domain::{
    Collection, CollectionItem, EntityId, Environment, HistoryItem, NewEnvironment, ProxyResponse,
    ProxySuccess, ResolvedRequest, StorableRequest,
};

use crate::ports::{ApiBackend, AuthToken, BackendError, Clock, FileStore, FileStoreError};

pub fn token() -> AuthToken {
    AuthToken::new("test-token").expect("non-blank token")
}

pub fn ok_response(status: u16, body: Value) -> ProxyResponse {
    ProxyResponse::Success(ProxySuccess {
        status,
        status_text: "OK".to_string(),
        time: 5.0,
        headers: [("content-type".to_string(), json!("application/json"))]
            .into_iter()
            .collect(),
        body,
    })
}

/// Backend double that behaves like the real one: sends are recorded in
/// history, deleting a collection removes its items.
#[derive(Default)]
pub struct MockBackend {
    pub proxy_response: Mutex<Option<ProxyResponse>>,
    pub failure: Mutex<Option<BackendError>>,
    pub sent: Mutex<Vec<ResolvedRequest>>,
    pub sent_tokens: Mutex<Vec<Option<AuthToken>>>,
    pub history: Mutex<Vec<HistoryItem>>,
    pub collections: Mutex<Vec<Collection>>,
    pub items: Mutex<Vec<CollectionItem>>,
    pub environments: Mutex<Vec<Environment>>,
    next_id: Mutex<u32>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&self, response: ProxyResponse) {
        *self.proxy_response.lock().expect("lock") = Some(response);
    }

    pub fn fail_with(&self, error: BackendError) {
        *self.failure.lock().expect("lock") = Some(error);
    }

    pub fn with_environment(self, env: Environment) -> Self {
        self.environments.lock().expect("lock").push(env);
        self
    }

    pub fn with_collection(self, id: &str, name: &str) -> Self {
        self.collections.lock().expect("lock").push(Collection {
            id: EntityId::new(id),
            name: name.to_string(),
        });
        self
    }

    pub fn with_item(self, id: &str, collection_id: &str, request: Value) -> Self {
        self.items.lock().expect("lock").push(CollectionItem {
            id: EntityId::new(id),
            collection_id: Some(EntityId::new(collection_id)),
            request: serde_json::from_value(request).unwrap(),
        });
        self
    }

    pub fn with_history(self, item: Value) -> Self {
        self.history
            .lock()
            .expect("lock")
            .push(serde_json::from_value(item).unwrap());
        self
    }

    fn check(&self) -> Result<(), BackendError> {
        self.failure.lock().expect("lock").clone().map_or(Ok(()), Err)
    }

    fn issue_id(&self, prefix: &str) -> EntityId {
        let mut next = self.next_id.lock().expect("lock");
        *next += 1;
        let n = *next;
        EntityId::new(format!("{prefix}{n}"))
    }
}

#[async_trait]
impl ApiBackend for MockBackend {
    async fn proxy(
        &self,
        request: &ResolvedRequest,
        token: Option<&AuthToken>,
    ) -> Result<ProxyResponse, BackendError> {
        self.check()?;
        self.sent.lock().expect("lock").push(request.clone());
        self.sent_tokens.lock().expect("lock").push(token.cloned());

        let id = self.issue_id("h");
        let stored = json!({
            "method": request.method,
            "url": request.url,
            "headers": request.headers,
            "params": request.params,
            "body": request.body,
        });
        self.history.lock().expect("lock").insert(
            0,
            HistoryItem {
                id,
                request: serde_json::from_value(stored).unwrap(),
                created_at: None,
            },
        );

        Ok(self
            .proxy_response
            .lock()
            .expect("lock")
            .clone()
            .unwrap_or_else(|| ok_response(200, json!({"ok": true}))))
    }

    async fn history(&self, _token: &AuthToken) -> Result<Vec<HistoryItem>, BackendError> {
        self.check()?;
        Ok(self.history.lock().expect("lock").clone())
    }

    async fn delete_history(&self, id: &EntityId, _token: &AuthToken) -> Result<(), BackendError> {
        self.check()?;
        self.history.lock().expect("lock").retain(|h| &h.id != id);
        Ok(())
    }

    async fn collections(&self, _token: &AuthToken) -> Result<Vec<Collection>, BackendError> {
        self.check()?;
        Ok(self.collections.lock().expect("lock").clone())
    }

    async fn create_collection(
        &self,
        name: &str,
        _token: &AuthToken,
    ) -> Result<Collection, BackendError> {
        self.check()?;
        let collection = Collection {
            id: self.issue_id("c"),
            name: name.to_string(),
        };
        self.collections.lock().expect("lock").push(collection.clone());
        Ok(collection)
    }

    async fn delete_collection(
        &self,
        id: &EntityId,
        _token: &AuthToken,
    ) -> Result<(), BackendError> {
        self.check()?;
        self.collections.lock().expect("lock").retain(|c| &c.id != id);
        self.items
            .lock()
            .expect("lock")
            .retain(|i| i.collection_id.as_ref() != Some(id));
        Ok(())
    }

    async fn collection_items(
        &self,
        collection_id: &EntityId,
        _token: &AuthToken,
    ) -> Result<Vec<CollectionItem>, BackendError> {
        self.check()?;
        Ok(self
            .items
            .lock()
            .expect("lock")
            .iter()
            .filter(|i| i.collection_id.as_ref() == Some(collection_id))
            .cloned()
            .collect())
    }

    async fn add_to_collection(
        &self,
        collection_id: &EntityId,
        request: &StorableRequest,
        _token: &AuthToken,
    ) -> Result<CollectionItem, BackendError> {
        self.check()?;
        let item = CollectionItem {
            id: self.issue_id("i"),
            collection_id: Some(collection_id.clone()),
            request: serde_json::from_value(serde_json::to_value(request).unwrap()).unwrap(),
        };
        self.items.lock().expect("lock").push(item.clone());
        Ok(item)
    }

    async fn delete_collection_item(
        &self,
        id: &EntityId,
        _token: &AuthToken,
    ) -> Result<(), BackendError> {
        self.check()?;
        self.items.lock().expect("lock").retain(|i| &i.id != id);
        Ok(())
    }

    async fn environments(&self, _token: &AuthToken) -> Result<Vec<Environment>, BackendError> {
        self.check()?;
        Ok(self.environments.lock().expect("lock").clone())
    }

    async fn create_environment(
        &self,
        environment: &NewEnvironment,
        _token: &AuthToken,
    ) -> Result<Environment, BackendError> {
        self.check()?;
        let created = Environment {
            id: self.issue_id("e"),
            name: environment.name.clone(),
            variables: environment.variables.clone(),
        };
        self.environments.lock().expect("lock").push(created.clone());
        Ok(created)
    }
}

/// File store double backed by a map.
#[derive(Default)]
pub struct MemoryFileStore {
    pub files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.files
            .lock()
            .expect("lock")
            .insert(PathBuf::from(path), contents.to_string());
        self
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files.lock().expect("lock").get(Path::new(path)).cloned()
    }
}

impl FileStore for MemoryFileStore {
    async fn read_text(&self, path: &Path) -> Result<String, FileStoreError> {
        self.files
            .lock()
            .expect("lock")
            .get(path)
            .cloned()
            .ok_or_else(|| FileStoreError::NotFound(path.to_path_buf()))
    }

    async fn write_json(&self, path: &Path, document: &Value) -> Result<(), FileStoreError> {
        let mut text = serde_json::to_string_pretty(document)
            .map_err(|e| FileStoreError::Encoding(e.to_string()))?;
        text.push('\n');
        self.files
            .lock()
            .expect("lock")
            .insert(path.to_path_buf(), text);
        Ok(())
    }
}

/// Clock pinned to 2024-05-01T12:00:00Z.
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }
}
