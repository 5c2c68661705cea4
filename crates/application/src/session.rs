//! Headless client session
//!
//! Holds everything a front end renders: the draft being edited, the
//! selected environment, cached backend lists, the last response and the
//! current notice. Every action catches its own errors and turns them into a
//! [`Notice`]; nothing propagates further than the returned `Err(Notice)`.

use std::fmt;
use std::path::Path;

use courier_domain::{
    Collection, CollectionItem, EntityId, Environment, HistoryItem, HttpMethod, KeyValuePair,
    RequestDraft, ResolvedRequest, ResponseView, present,
};
use tracing::{debug, warn};

use crate::error::{Action, ApplicationError, ApplicationResult, Resource};
use crate::pipeline::resolve_request;
use crate::ports::{ApiBackend, AuthToken, Clock, FileStore};
use crate::use_cases::{
    CreateCollection, CreateEnvironment, DeleteCollection, DeleteCollectionItem, DeleteHistoryItem,
    ExportRequest, ImportRequest, LoadCollectionItems, LoadCollections, LoadEnvironments,
    LoadHistory, SaveToCollection, SendOutcome, SendRequest,
};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Confirmation of a completed action.
    Info,
    /// The action failed.
    Error,
}

/// A message for the user about the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Text to show.
    pub message: String,
}

impl Notice {
    /// Creates an informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Returns true for error notices.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of a session action. The error notice is also kept on the session.
pub type Outcome = Result<(), Notice>;

/// Client state for one signed-in user.
///
/// Backend lists start as `None` ("not yet available") and stay that way
/// while there is no token.
pub struct Session<B, F, C> {
    backend: B,
    files: F,
    clock: C,
    token: Option<AuthToken>,
    draft: RequestDraft,
    environments: Option<Vec<Environment>>,
    selected_environment: Option<EntityId>,
    history: Option<Vec<HistoryItem>>,
    collections: Option<Vec<Collection>>,
    active_collection: Option<EntityId>,
    collection_items: Vec<CollectionItem>,
    response: ResponseView,
    notice: Option<Notice>,
}

impl<B: ApiBackend, F: FileStore, C: Clock> Session<B, F, C> {
    /// Creates a signed-out session with an empty draft.
    pub fn new(backend: B, files: F, clock: C) -> Self {
        Self {
            backend,
            files,
            clock,
            token: None,
            draft: RequestDraft::new(),
            environments: None,
            selected_environment: None,
            history: None,
            collections: None,
            active_collection: None,
            collection_items: Vec::new(),
            response: ResponseView::Empty,
            notice: None,
        }
    }

    /// Sets the bearer token, returning the session.
    #[must_use]
    pub fn with_token(mut self, token: Option<AuthToken>) -> Self {
        self.set_token(token);
        self
    }

    /// Replaces the bearer token. Signing out drops every cached list.
    pub fn set_token(&mut self, token: Option<AuthToken>) {
        if token.is_none() {
            self.environments = None;
            self.selected_environment = None;
            self.history = None;
            self.collections = None;
            self.active_collection = None;
            self.collection_items.clear();
        }
        self.token = token;
    }

    /// Returns true when a token is present.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    // --- state -------------------------------------------------------------

    /// The request being edited.
    #[must_use]
    pub const fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    /// Cached environments, if loaded.
    #[must_use]
    pub fn environments(&self) -> Option<&[Environment]> {
        self.environments.as_deref()
    }

    /// The selected environment, if any.
    #[must_use]
    pub fn selected_environment(&self) -> Option<&Environment> {
        let id = self.selected_environment.as_ref()?;
        self.environments.as_ref()?.iter().find(|e| &e.id == id)
    }

    /// Finds a cached environment by display name.
    #[must_use]
    pub fn environment_named(&self, name: &str) -> Option<&Environment> {
        self.environments.as_ref()?.iter().find(|e| e.name == name)
    }

    /// Cached history, if loaded.
    #[must_use]
    pub fn history(&self) -> Option<&[HistoryItem]> {
        self.history.as_deref()
    }

    /// Cached collections, if loaded.
    #[must_use]
    pub fn collections(&self) -> Option<&[Collection]> {
        self.collections.as_deref()
    }

    /// The open collection.
    #[must_use]
    pub const fn active_collection(&self) -> Option<&EntityId> {
        self.active_collection.as_ref()
    }

    /// Items of the open collection.
    #[must_use]
    pub fn collection_items(&self) -> &[CollectionItem] {
        &self.collection_items
    }

    /// What the response panel shows.
    #[must_use]
    pub const fn response(&self) -> &ResponseView {
        &self.response
    }

    /// The notice from the last action.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Dismisses the current notice.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    // --- draft editing -----------------------------------------------------

    /// Sets the URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.draft.set_url(url);
    }

    /// Sets the method.
    pub fn set_method(&mut self, method: HttpMethod) {
        self.draft.set_method(method);
    }

    /// Replaces the body text; the JSON flag updates immediately.
    pub fn edit_body(&mut self, body: impl Into<String>) {
        self.draft.edit_body(body);
    }

    /// Replaces the header row at `index`.
    pub fn update_header(&mut self, index: usize, pair: KeyValuePair) {
        self.draft.update_header(index, pair);
    }

    /// Appends a blank header row.
    pub fn add_header(&mut self) {
        self.draft.add_header();
    }

    /// Removes the header row at `index`.
    pub fn remove_header(&mut self, index: usize) {
        self.draft.remove_header(index);
    }

    /// Replaces the param row at `index`.
    pub fn update_param(&mut self, index: usize, pair: KeyValuePair) {
        self.draft.update_param(index, pair);
    }

    /// Appends a blank param row.
    pub fn add_param(&mut self) {
        self.draft.add_param();
    }

    /// Removes the param row at `index`.
    pub fn remove_param(&mut self, index: usize) {
        self.draft.remove_param(index);
    }

    /// Replaces the draft with a stored history entry.
    ///
    /// # Errors
    ///
    /// Returns a notice if the entry is not in the loaded history.
    pub fn load_history_item(&mut self, id: &EntityId) -> Outcome {
        let template = self
            .history
            .as_ref()
            .and_then(|items| items.iter().find(|h| &h.id == id))
            .map(HistoryItem::to_template)
            .ok_or_else(|| ApplicationError::NotFound(format!("history item {id}")));
        let template = self.settle(template, Action::Load(Resource::History))?;
        self.draft.load(template);
        self.notice = None;
        Ok(())
    }

    /// Replaces the draft with an item of the open collection.
    ///
    /// # Errors
    ///
    /// Returns a notice if the item is not in the loaded list.
    pub fn load_collection_item(&mut self, id: &EntityId) -> Outcome {
        let template = self
            .collection_items
            .iter()
            .find(|i| &i.id == id)
            .map(CollectionItem::to_template)
            .ok_or_else(|| ApplicationError::NotFound(format!("collection item {id}")));
        let template = self.settle(template, Action::Load(Resource::CollectionItems))?;
        self.draft.load(template);
        self.notice = None;
        Ok(())
    }

    // --- environments ------------------------------------------------------

    /// Selects an environment by id. An unknown id, or `None`, clears the
    /// selection.
    pub fn select_environment(&mut self, id: Option<&EntityId>) -> Option<&Environment> {
        self.selected_environment = id
            .filter(|id| {
                self.environments
                    .as_ref()
                    .is_some_and(|envs| envs.iter().any(|e| &e.id == *id))
            })
            .cloned();
        self.selected_environment()
    }

    /// Loads environments. Skipped while signed out.
    ///
    /// # Errors
    ///
    /// Returns a notice if the backend call fails; the list becomes empty.
    pub async fn load_environments(&mut self) -> Outcome {
        let Some(token) = self.token.as_ref() else {
            debug!("not signed in, environments not loaded");
            return Ok(());
        };
        let result = LoadEnvironments::new(&self.backend).execute(token).await;

        match self.settle(result, Action::Load(Resource::Environments)) {
            Ok(environments) => {
                self.environments = Some(environments);
                let selected = self.selected_environment.clone();
                self.select_environment(selected.as_ref());
                Ok(())
            }
            Err(notice) => {
                self.environments = Some(Vec::new());
                self.selected_environment = None;
                Err(notice)
            }
        }
    }

    /// Creates an environment from a name and a JSON object of variables,
    /// then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns a notice for blank input, non-object variables or a backend
    /// failure.
    pub async fn create_environment(&mut self, name: &str, variables: &str) -> Outcome {
        let result = match self.require_token() {
            Ok(token) => {
                CreateEnvironment::new(&self.backend)
                    .execute(name, variables, token)
                    .await
            }
            Err(e) => Err(e),
        };
        let created = self.settle(result, Action::Create(Resource::Environments))?;
        self.load_environments().await?;
        self.notify(Notice::info(format!("Environment \"{}\" created", created.name)));
        Ok(())
    }

    // --- history -----------------------------------------------------------

    /// Reloads history. Skipped while signed out.
    ///
    /// # Errors
    ///
    /// Returns a notice if the backend call fails.
    pub async fn refresh_history(&mut self) -> Outcome {
        let Some(token) = self.token.as_ref() else {
            debug!("not signed in, history not loaded");
            return Ok(());
        };
        let result = LoadHistory::new(&self.backend).execute(token).await;
        self.history = Some(self.settle(result, Action::Load(Resource::History))?);
        Ok(())
    }

    /// Deletes a history entry and reloads the list.
    ///
    /// # Errors
    ///
    /// Returns a notice if the backend call fails.
    pub async fn delete_history(&mut self, id: &EntityId) -> Outcome {
        let result = match self.require_token() {
            Ok(token) => DeleteHistoryItem::new(&self.backend).execute(id, token).await,
            Err(e) => Err(e),
        };
        self.settle(result, Action::Delete(Resource::History))?;
        self.refresh_history().await
    }

    // --- collections -------------------------------------------------------

    /// Reloads collections. Skipped while signed out.
    ///
    /// # Errors
    ///
    /// Returns a notice if the backend call fails.
    pub async fn load_collections(&mut self) -> Outcome {
        let Some(token) = self.token.as_ref() else {
            debug!("not signed in, collections not loaded");
            return Ok(());
        };
        let result = LoadCollections::new(&self.backend).execute(token).await;
        self.collections = Some(self.settle(result, Action::Load(Resource::Collections))?);
        Ok(())
    }

    /// Creates a collection and reloads the list. A blank name does nothing.
    ///
    /// # Errors
    ///
    /// Returns a notice if the backend call fails.
    pub async fn create_collection(&mut self, name: &str) -> Outcome {
        if name.trim().is_empty() {
            return Ok(());
        }
        let result = match self.require_token() {
            Ok(token) => CreateCollection::new(&self.backend).execute(name, token).await,
            Err(e) => Err(e),
        };
        self.settle(result, Action::Create(Resource::Collections))?;
        self.load_collections().await
    }

    /// Deletes a collection (and its items), closing it if it was open.
    ///
    /// # Errors
    ///
    /// Returns a notice if the backend call fails.
    pub async fn delete_collection(&mut self, id: &EntityId) -> Outcome {
        let result = match self.require_token() {
            Ok(token) => DeleteCollection::new(&self.backend).execute(id, token).await,
            Err(e) => Err(e),
        };
        self.settle(result, Action::Delete(Resource::Collections))?;

        if self.active_collection.as_ref() == Some(id) {
            self.active_collection = None;
            self.collection_items.clear();
        }
        self.load_collections().await
    }

    /// Opens a collection and loads its items.
    ///
    /// # Errors
    ///
    /// Returns a notice if the items cannot be loaded.
    pub async fn open_collection(&mut self, id: &EntityId) -> Outcome {
        self.active_collection = Some(id.clone());
        self.collection_items.clear();
        self.reload_collection_items().await
    }

    /// Deletes an item and reloads the open collection.
    ///
    /// # Errors
    ///
    /// Returns a notice if the backend call fails.
    pub async fn delete_collection_item(&mut self, id: &EntityId) -> Outcome {
        let result = match self.require_token() {
            Ok(token) => DeleteCollectionItem::new(&self.backend).execute(id, token).await,
            Err(e) => Err(e),
        };
        self.settle(result, Action::Delete(Resource::CollectionItems))?;
        self.reload_collection_items().await
    }

    async fn reload_collection_items(&mut self) -> Outcome {
        let (Some(token), Some(collection)) = (self.token.as_ref(), self.active_collection.as_ref())
        else {
            return Ok(());
        };
        let result = LoadCollectionItems::new(&self.backend)
            .execute(collection, token)
            .await;
        self.collection_items = self.settle(result, Action::Load(Resource::CollectionItems))?;
        Ok(())
    }

    // --- request actions ---------------------------------------------------

    /// Resolves the draft against the selected environment without sending.
    ///
    /// # Errors
    ///
    /// Returns a notice if the draft does not resolve.
    pub fn preview(&mut self) -> Result<ResolvedRequest, Notice> {
        let result =
            resolve_request(&self.draft, self.selected_environment()).map_err(ApplicationError::from);
        self.settle(result, Action::Send)
    }

    /// Sends the draft through the proxy and shows the response.
    ///
    /// On success the history is reloaded when signed in. A proxy-level
    /// `{error}` is shown as the response and reported as a notice.
    ///
    /// # Errors
    ///
    /// Returns a notice for validation, network and proxy errors. The draft is
    /// left as it was.
    pub async fn send(&mut self) -> Outcome {
        let result = self.try_send().await;
        let outcome = self.settle(result, Action::Send)?;

        self.response = present(Some(&outcome.response));
        if let Some(error) = outcome.response.error() {
            return Err(self.notify(Notice::error(error)));
        }
        self.notice = None;

        if let Err(notice) = self.refresh_history().await {
            debug!(%notice, "history not refreshed after send");
        }
        Ok(())
    }

    async fn try_send(&self) -> ApplicationResult<SendOutcome> {
        SendRequest::new(&self.backend)
            .execute(&self.draft, self.selected_environment(), self.token.as_ref())
            .await
    }

    /// Saves the unresolved draft into the open collection.
    ///
    /// # Errors
    ///
    /// Returns a notice if no collection is open, the body is not JSON or the
    /// backend call fails.
    pub async fn save(&mut self) -> Outcome {
        let result = match self.require_token() {
            Ok(token) => {
                SaveToCollection::new(&self.backend)
                    .execute(self.active_collection.as_ref(), self.draft.template(), token)
                    .await
            }
            Err(e) => Err(e),
        };
        self.settle(result, Action::Save)?;

        if let Err(notice) = self.reload_collection_items().await {
            debug!(%notice, "items not refreshed after save");
        }
        self.notify(Notice::info("Saved to collection"));
        Ok(())
    }

    /// Writes the draft to `path` as an export document.
    ///
    /// # Errors
    ///
    /// Returns a notice for an empty URL, an invalid body or a write failure.
    pub async fn export(&mut self, path: &Path) -> Outcome {
        let result = ExportRequest::new(&self.files, &self.clock)
            .execute(self.draft.template(), path)
            .await;
        self.settle(result, Action::Export)?;
        self.notify(Notice::info(format!("Request exported to {}", path.display())));
        Ok(())
    }

    /// Replaces the draft with the request stored in `path`.
    ///
    /// # Errors
    ///
    /// Returns a notice if the file cannot be read or is not a request; the
    /// draft is left untouched.
    pub async fn import(&mut self, path: &Path) -> Outcome {
        let result = ImportRequest::new(&self.files).execute(path).await;
        let template = self.settle(result, Action::Import)?;
        self.draft.load(template);
        self.notify(Notice::info("Request imported"));
        Ok(())
    }

    // --- helpers -----------------------------------------------------------

    fn require_token(&self) -> ApplicationResult<&AuthToken> {
        self.token.as_ref().ok_or(ApplicationError::NotSignedIn)
    }

    fn notify(&mut self, notice: Notice) -> Notice {
        self.notice = Some(notice.clone());
        notice
    }

    fn settle<T>(&mut self, result: ApplicationResult<T>, action: Action) -> Result<T, Notice> {
        result.map_err(|error| {
            warn!(%error, ?action, "action failed");
            self.notify(Notice::error(error.user_message(action)))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ports::BackendError;
    use crate::test_support::{FixedClock, MemoryFileStore, MockBackend, ok_response, token};
    use courier_domain::{KeyValueList, ProxyResponse, StatusClass};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    type TestSession = Session<MockBackend, MemoryFileStore, FixedClock>;

    fn signed_in(backend: MockBackend) -> TestSession {
        Session::new(backend, MemoryFileStore::new(), FixedClock).with_token(Some(token()))
    }

    fn dev() -> Environment {
        Environment::new("e1", "dev")
            .with_variable("base", "https://api.x.com")
            .with_variable("token", "abc")
    }

    #[tokio::test]
    async fn test_signed_out_loads_are_skipped() {
        let mut session = Session::new(MockBackend::new(), MemoryFileStore::new(), FixedClock);

        assert_eq!(session.load_environments().await, Ok(()));
        assert_eq!(session.refresh_history().await, Ok(()));
        assert_eq!(session.load_collections().await, Ok(()));
        assert!(session.environments().is_none());
        assert!(session.history().is_none());
        assert!(session.collections().is_none());
        assert!(session.notice().is_none());
    }

    #[tokio::test]
    async fn test_send_flow() {
        let backend = MockBackend::new().with_environment(dev());
        backend.respond_with(ok_response(404, json!({"error": "no such user"})));
        let mut session = signed_in(backend);

        session.load_environments().await.unwrap();
        session.select_environment(Some(&EntityId::new("e1")));
        session.set_url("{{base}}/users/9");
        session.update_header(0, KeyValuePair::new("Authorization", "Bearer {{token}}"));

        session.send().await.unwrap();

        let sent = session.backend.sent.lock().expect("lock").clone();
        assert_eq!(sent[0].url, "https://api.x.com/users/9");
        assert_eq!(sent[0].headers["Authorization"], "Bearer abc");

        let view = session.response().success().unwrap();
        assert_eq!(view.status, 404);
        assert_eq!(view.class, StatusClass::Failure);

        // The send shows up in history without a manual refresh.
        assert_eq!(session.history().unwrap().len(), 1);
        // The draft keeps its placeholders.
        assert_eq!(session.draft().template().url, "{{base}}/users/9");
    }

    #[tokio::test]
    async fn test_send_validation_notices() {
        let mut session = signed_in(MockBackend::new());

        assert_eq!(session.send().await, Err(Notice::error("URL is required")));

        session.set_url("https://x");
        session.set_method(HttpMethod::Post);
        session.edit_body("{oops");
        assert_eq!(session.send().await, Err(Notice::error("Fix JSON format first")));
        assert!(session.backend.sent.lock().expect("lock").is_empty());
        assert!(session.response().is_empty());
    }

    #[tokio::test]
    async fn test_send_network_failure_keeps_draft() {
        let backend = MockBackend::new();
        backend.fail_with(BackendError::Network("refused".to_string()));
        let mut session = signed_in(backend);
        session.set_url("https://x");

        let notice = session.send().await.unwrap_err();
        assert_eq!(
            notice.message,
            "Request failed. Check backend URL or authentication."
        );
        assert_eq!(session.draft().template().url, "https://x");
    }

    #[tokio::test]
    async fn test_proxy_error_is_shown() {
        let backend = MockBackend::new();
        backend.respond_with(ProxyResponse::Failure {
            error: "ECONNREFUSED".to_string(),
        });
        let mut session = signed_in(backend);
        session.set_url("https://down");

        assert_eq!(session.send().await, Err(Notice::error("ECONNREFUSED")));
        assert!(session.response().is_error());
    }

    #[tokio::test]
    async fn test_send_without_token_skips_history() {
        let mut session = Session::new(MockBackend::new(), MemoryFileStore::new(), FixedClock);
        session.set_url("https://x");

        assert_eq!(session.send().await, Ok(()));
        assert!(matches!(session.response(), ResponseView::Success(_)));
        assert_eq!(session.backend.sent_tokens.lock().unwrap().clone(), vec![None]);
        assert!(session.history().is_none());
    }

    #[tokio::test]
    async fn test_unknown_environment_clears_selection() {
        let mut session = signed_in(MockBackend::new().with_environment(dev()));
        session.load_environments().await.unwrap();

        assert!(session.select_environment(Some(&EntityId::new("e1"))).is_some());
        assert!(session.select_environment(Some(&EntityId::new("zzz"))).is_none());
        assert!(session.selected_environment().is_none());
        assert_eq!(session.environment_named("dev").map(|e| e.id.as_str()), Some("e1"));
    }

    #[tokio::test]
    async fn test_create_environment() {
        let mut session = signed_in(MockBackend::new());

        assert_eq!(
            session.create_environment("", "").await,
            Err(Notice::error("Name and variables are required"))
        );
        assert_eq!(
            session.create_environment("qa", "not json").await,
            Err(Notice::error("Variables must be valid JSON"))
        );

        session
            .create_environment("qa", r#"{"base": "https://qa"}"#)
            .await
            .unwrap();
        let envs = session.environments().unwrap();
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].get("base"), Some("https://qa"));
        assert!(!session.notice().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_history_item_loads_into_draft() {
        let backend = MockBackend::new().with_history(json!({
            "id": 5,
            "request": {
                "method": "PATCH",
                "url": "{{base}}/users/1",
                "headers": {"X-Trace": "1"},
                "body": "{\"a\":1}"
            }
        }));
        let mut session = signed_in(backend);
        session.refresh_history().await.unwrap();
        session.edit_body("{broken");

        session.load_history_item(&EntityId::new("5")).unwrap();

        let t = session.draft().template();
        assert_eq!(t.method, HttpMethod::Patch);
        assert_eq!(t.headers.all(), &[KeyValuePair::new("X-Trace", "1")]);
        assert_eq!(t.params, KeyValueList::blank());
        assert_eq!(t.body, "{\n  \"a\": 1\n}");
        assert_eq!(session.draft().json_error(), None);

        assert!(session.load_history_item(&EntityId::new("404")).is_err());
    }

    #[tokio::test]
    async fn test_delete_history_refreshes() {
        let backend = MockBackend::new()
            .with_history(json!({"id": 1, "method": "GET", "url": "a"}))
            .with_history(json!({"id": 2, "method": "GET", "url": "b"}));
        let mut session = signed_in(backend);
        session.refresh_history().await.unwrap();

        session.delete_history(&EntityId::new("1")).await.unwrap();
        assert_eq!(session.history().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_collection_flow() {
        let mut session = signed_in(MockBackend::new());

        session.create_collection("   ").await.unwrap();
        assert!(session.collections().is_none());

        session.create_collection("Users").await.unwrap();
        let id = session.collections().unwrap()[0].id.clone();

        // Saving without an open collection.
        session.set_url("{{base}}/users");
        assert_eq!(
            session.save().await,
            Err(Notice::error("Select a collection first"))
        );

        session.open_collection(&id).await.unwrap();
        session.save().await.unwrap();
        assert_eq!(session.notice(), Some(&Notice::info("Saved to collection")));
        assert_eq!(session.collection_items().len(), 1);

        let item_id = session.collection_items()[0].id.clone();
        session.set_url("changed");
        session.load_collection_item(&item_id).unwrap();
        assert_eq!(session.draft().template().url, "{{base}}/users");

        session.delete_collection_item(&item_id).await.unwrap();
        assert!(session.collection_items().is_empty());

        session.save().await.unwrap();
        session.delete_collection(&id).await.unwrap();
        assert!(session.active_collection().is_none());
        assert!(session.collection_items().is_empty());
        assert!(session.collections().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_invalid_body() {
        let mut session = signed_in(MockBackend::new().with_collection("c1", "Users"));
        session.open_collection(&EntityId::new("c1")).await.unwrap();
        session.set_url("https://x");
        session.edit_body("{");

        assert_eq!(
            session.save().await,
            Err(Notice::error("Invalid JSON, cannot save"))
        );
    }

    #[tokio::test]
    async fn test_export_then_import() {
        let mut session = signed_in(MockBackend::new());
        let path = Path::new("api-request.json");

        assert_eq!(
            session.export(path).await,
            Err(Notice::error("Nothing to export"))
        );

        session.set_url("{{base}}/users");
        session.set_method(HttpMethod::Post);
        session.edit_body("{\"name\": \"ada\"}");
        session.export(path).await.unwrap();

        session.set_url("https://other");
        session.import(path).await.unwrap();

        let t = session.draft().template();
        assert_eq!(t.url, "{{base}}/users");
        assert_eq!(t.method, HttpMethod::Post);
        assert_eq!(t.body, "{\n  \"name\": \"ada\"\n}");
        assert_eq!(session.notice(), Some(&Notice::info("Request imported")));
    }

    #[tokio::test]
    async fn test_bad_import_leaves_draft() {
        let files = MemoryFileStore::new()
            .with_file("empty.json", "{}")
            .with_file("garbage.json", "<html>");
        let mut session = Session::new(MockBackend::new(), files, FixedClock);
        session.set_url("https://keep");

        assert_eq!(
            session.import(Path::new("empty.json")).await,
            Err(Notice::error("Invalid request file format"))
        );
        assert_eq!(
            session.import(Path::new("garbage.json")).await,
            Err(Notice::error("Invalid JSON file"))
        );
        assert_eq!(session.draft().template().url, "https://keep");
    }

    #[tokio::test]
    async fn test_preview_uses_selected_environment() {
        let mut session = signed_in(MockBackend::new().with_environment(dev()));
        session.load_environments().await.unwrap();
        session.select_environment(Some(&EntityId::new("e1")));
        session.set_url("{{base}}/ping");

        let resolved = session.preview().unwrap();
        assert_eq!(resolved.url, "https://api.x.com/ping");
        assert!(session.backend.sent.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_drops_cached_lists() {
        let mut session = signed_in(MockBackend::new().with_environment(dev()));
        session.load_environments().await.unwrap();
        session.set_token(None);
        assert!(session.environments().is_none());
        assert!(!session.is_signed_in());
    }
}
