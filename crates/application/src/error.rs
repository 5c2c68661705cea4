//! Application error types

use std::fmt;

use courier_domain::DomainError;
use thiserror::Error;

use crate::ports::{BackendError, FileStoreError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The backend call failed.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// A local file could not be read or written.
    #[error("file error: {0}")]
    FileAccess(#[from] FileStoreError),

    /// An import file is not JSON at all.
    #[error("file is not valid JSON: {0}")]
    UnreadableFile(String),

    /// Saving requires an open collection.
    #[error("no collection selected")]
    NoCollectionSelected,

    /// The action needs a bearer token.
    #[error("not signed in")]
    NotSignedIn,

    /// A new environment needs both a name and variables.
    #[error("environment name and variables are required")]
    IncompleteEnvironment,

    /// Environment variables text is not a JSON object.
    #[error("environment variables must be a JSON object")]
    InvalidVariables,

    /// The referenced entity is not in the loaded list.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// What the user was doing when an error happened.
///
/// The same error reads differently depending on the action, e.g. a missing
/// URL is "URL is required" on send but "Nothing to export" on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Sending the draft through the proxy.
    Send,
    /// Writing the draft to a file.
    Export,
    /// Reading a draft from a file.
    Import,
    /// Saving the draft into the open collection.
    Save,
    /// Loading a list from the backend.
    Load(Resource),
    /// Creating an entity on the backend.
    Create(Resource),
    /// Deleting an entity on the backend.
    Delete(Resource),
}

/// Backend-owned lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Request history.
    History,
    /// Collections.
    Collections,
    /// Items of a collection.
    CollectionItems,
    /// Environments.
    Environments,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::History => "history",
            Self::Collections => "collections",
            Self::CollectionItems => "collection",
            Self::Environments => "environments",
        })
    }
}

impl ApplicationError {
    /// Returns the notice shown to the user for this error.
    #[must_use]
    pub fn user_message(&self, action: Action) -> String {
        match (self, action) {
            (Self::Domain(DomainError::MissingUrl), Action::Export) => "Nothing to export".into(),
            (Self::Domain(DomainError::MissingUrl), _) => "URL is required".into(),
            (Self::Domain(DomainError::InvalidBody(_)), Action::Export) => {
                "Invalid JSON, cannot export".into()
            }
            (Self::Domain(DomainError::InvalidBody(_)), Action::Save) => {
                "Invalid JSON, cannot save".into()
            }
            (Self::Domain(DomainError::InvalidBody(_)), _) => "Fix JSON format first".into(),
            (
                Self::Domain(DomainError::MalformedImport(_) | DomainError::UnsupportedMethod(_)),
                _,
            ) => "Invalid request file format".into(),
            (Self::UnreadableFile(_), _) => "Invalid JSON file".into(),
            (Self::Backend(BackendError::Rejected(message)), _) => message.clone(),
            (Self::Backend(_), Action::Send) => {
                "Request failed. Check backend URL or authentication.".into()
            }
            (Self::Backend(BackendError::Network(_)), Action::Load(what)) => {
                format!("Network error loading {what}")
            }
            (Self::Backend(BackendError::UnexpectedShape(_)), Action::Load(what)) => {
                format!("Failed to load {what}")
            }
            (Self::Backend(BackendError::Network(_)), _) => {
                "Network error. Check backend URL or authentication.".into()
            }
            (Self::Backend(BackendError::UnexpectedShape(_)), _) => {
                "Unexpected response from backend".into()
            }
            (Self::FileAccess(FileStoreError::NotFound(path)), _) => {
                format!("File not found: {}", path.display())
            }
            (Self::FileAccess(_), Action::Export) => "Could not write file".into(),
            (Self::FileAccess(_), _) => "Could not read file".into(),
            (Self::NoCollectionSelected, _) => "Select a collection first".into(),
            (Self::NotSignedIn, _) => "Sign in first".into(),
            (Self::IncompleteEnvironment, _) => "Name and variables are required".into(),
            (Self::InvalidVariables, _) => "Variables must be valid JSON".into(),
            (Self::NotFound(what), _) => format!("Not found: {what}"),
        }
    }
}
