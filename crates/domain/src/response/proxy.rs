//! Raw result returned by the backend proxy

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// What the proxy returns for one send: either the upstream response or an
/// error message, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProxyResponse {
    /// The upstream call completed (any status code).
    Success(ProxySuccess),
    /// The proxy could not complete the call.
    Failure {
        /// Message reported by the backend.
        error: String,
    },
}

/// An upstream response relayed by the proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProxySuccess {
    /// HTTP status code.
    #[serde(default)]
    pub status: u16,
    /// Reason phrase.
    #[serde(default, rename = "statusText")]
    pub status_text: String,
    /// Round-trip time in milliseconds, as measured by the proxy.
    #[serde(default)]
    pub time: f64,
    /// Response headers. Values are usually strings but are not guaranteed to be.
    #[serde(default)]
    pub headers: BTreeMap<String, Value>,
    /// Response body, already decoded by the proxy.
    #[serde(default)]
    pub body: Value,
}

impl ProxyResponse {
    /// Returns the error message for a failed send.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success(_) => None,
        }
    }

    /// Interprets an arbitrary JSON document from the proxy endpoint.
    ///
    /// A truthy `error` field makes the whole document a failure; anything
    /// else is read as a success with missing fields defaulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not an object or a success field
    /// has the wrong type.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if let Some(error) = value.get("error").filter(|e| is_truthy(e)) {
            let error = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Ok(Self::Failure { error });
        }
        serde_json::from_value(value).map(Self::Success)
    }
}

impl<'de> Deserialize<'de> for ProxyResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => true,
    }
}
