//! Resolved request type

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::HttpMethod;

/// A request with every placeholder substituted, ready for the proxy.
///
/// Built fresh for each send and never persisted. This is the exact payload
/// posted to the backend's `/proxy` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRequest {
    /// Final URL.
    pub url: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Headers; a key appearing twice in the template keeps the last value.
    pub headers: BTreeMap<String, String>,
    /// Query parameters, with the same last-write-wins rule.
    pub params: BTreeMap<String, String>,
    /// Parsed body, omitted when the template has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}
