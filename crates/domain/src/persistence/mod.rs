//! Persisted and exchanged request shapes
//!
//! Everything that crosses the storage or file boundary goes through this
//! module, so the rest of the crate only ever sees a normalized
//! [`RequestTemplate`](crate::request::RequestTemplate).

mod exchange;
mod request;

pub use exchange::{EXPORT_FILE_NAME, ExportDocument, StorableRequest, from_imported};
pub use request::PersistedRequest;
