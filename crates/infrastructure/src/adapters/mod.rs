//! Port implementations.

mod file_store;
mod rest_backend;
mod system_clock;

pub use file_store::TokioFileStore;
pub use rest_backend::RestBackend;
pub use system_clock::SystemClock;
