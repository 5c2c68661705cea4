//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the backend REST client, the local
//! file store and the system clock, plus client configuration.

pub mod adapters;
pub mod config;
pub mod serialization;

pub use adapters::{RestBackend, SystemClock, TokioFileStore};
pub use config::{ClientConfig, ConfigError, DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT};
pub use serialization::{SerializationError, to_json_stable};
