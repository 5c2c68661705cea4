//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod backend;
mod clock;
mod file_store;

pub use backend::{ApiBackend, AuthToken, BackendError};
pub use clock::Clock;
pub use file_store::{FileStore, FileStoreError};
