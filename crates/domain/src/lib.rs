//! Courier Domain - Core business types
//!
//! This crate defines the domain model for the Courier API client: request
//! templates and their stored shapes, environments, history, collections and
//! the response display model.
//! All types here are pure Rust with no I/O dependencies.

pub mod collection;
pub mod environment;
pub mod error;
pub mod history;
pub mod id;
pub mod persistence;
pub mod request;
pub mod response;

pub use collection::{Collection, CollectionItem};
pub use environment::{Environment, NewEnvironment, VariableMap};
pub use error::{DomainError, DomainResult};
pub use history::HistoryItem;
pub use id::{EntityId, generate_id};
pub use persistence::{
    EXPORT_FILE_NAME, ExportDocument, PersistedRequest, StorableRequest, from_imported,
};
pub use request::{
    HttpMethod, KeyValueList, KeyValuePair, MethodColor, RequestDraft, RequestTemplate,
    ResolvedRequest,
};
pub use response::{ProxyResponse, ProxySuccess, ResponseView, StatusClass, SuccessView, present};
