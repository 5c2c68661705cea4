//! Courier Application - Use cases and ports
//!
//! Orchestrates the domain model: variable resolution, the send pipeline,
//! import/export and the backend-owned lists. I/O happens only through the
//! traits in [`ports`], implemented by the infrastructure crate.

pub mod error;
pub mod pipeline;
pub mod ports;
pub mod session;
pub mod use_cases;
pub mod variable_resolver;

#[cfg(test)]
mod test_support;

pub use error::{Action, ApplicationError, ApplicationResult, Resource};
pub use pipeline::resolve_request;
pub use ports::{ApiBackend, AuthToken, BackendError, Clock, FileStore, FileStoreError};
pub use session::{Notice, NoticeKind, Outcome, Session};
pub use variable_resolver::{VariableResolver, resolve};
