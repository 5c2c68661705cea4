//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while validating or converting requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request URL is empty after trimming.
    #[error("URL is required")]
    MissingUrl,

    /// The request body (raw or after variable substitution) is not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidBody(String),

    /// An imported request document lacks required fields.
    #[error("malformed import: {0}")]
    MalformedImport(String),

    /// The HTTP method is not one of the supported verbs.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

impl DomainError {
    /// Returns true for errors that block an action before anything is sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingUrl | Self::InvalidBody(_) | Self::UnsupportedMethod(_)
        )
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
