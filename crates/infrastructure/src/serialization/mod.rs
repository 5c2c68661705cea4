//! Deterministic JSON output for exported files and CLI output.
//!
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::{SerializationError, to_json_stable};
