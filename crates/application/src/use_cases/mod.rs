//! Application use cases (business logic orchestration).

mod collections;
mod environments;
mod export_request;
mod history;
mod import_request;
mod save_to_collection;
mod send_request;

pub use collections::{
    CreateCollection, DeleteCollection, DeleteCollectionItem, LoadCollectionItems, LoadCollections,
};
pub use environments::{CreateEnvironment, LoadEnvironments};
pub use export_request::ExportRequest;
pub use history::{DeleteHistoryItem, LoadHistory};
pub use import_request::ImportRequest;
pub use save_to_collection::SaveToCollection;
pub use send_request::{SendOutcome, SendRequest};
