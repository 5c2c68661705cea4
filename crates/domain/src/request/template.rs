//! Request template type

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{HttpMethod, KeyValueList};
use crate::error::{DomainError, DomainResult};

/// An editable request, as authored by the user.
///
/// Every text field may contain `{{variable}}` placeholders. The body is kept
/// as raw text so that placeholders in non-string positions (e.g.
/// `{"id": {{userId}}}`) survive until resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL.
    pub url: String,
    /// Header rows, in editing order.
    pub headers: KeyValueList,
    /// Query parameter rows, in editing order.
    pub params: KeyValueList,
    /// Raw body text. Empty means no body; otherwise expected to be JSON.
    pub body: String,
}

impl RequestTemplate {
    /// Creates a template with blank header/param rows and no body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: KeyValueList::blank(),
            params: KeyValueList::blank(),
            body: String::new(),
        }
    }

    /// Sets the header rows.
    #[must_use]
    pub fn with_headers(mut self, headers: KeyValueList) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the param rows.
    #[must_use]
    pub fn with_params(mut self, params: KeyValueList) -> Self {
        self.params = params;
        self
    }

    /// Sets the raw body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Parses the raw body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if the body is non-empty and not JSON.
    pub fn parsed_body(&self) -> DomainResult<Option<Value>> {
        parse_body(&self.body)
    }
}

impl Default for RequestTemplate {
    fn default() -> Self {
        Self::new(HttpMethod::Get, "")
    }
}

/// Parses body text; empty text means "no body".
///
/// # Errors
///
/// Returns `DomainError::InvalidBody` when non-empty text is not JSON.
pub fn parse_body(text: &str) -> DomainResult<Option<Value>> {
    if text.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| DomainError::InvalidBody(e.to_string()))
}

/// Pretty-prints a JSON value with 2-space indentation.
#[must_use]
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Turns a body value into editable text.
///
/// `null` and absent bodies become `""`; any other value, strings included,
/// is pretty-printed as JSON so that it parses back to the same value.
#[must_use]
pub fn body_text_from_json(body: Option<&Value>) -> String {
    match body {
        None | Some(Value::Null) => String::new(),
        Some(value) => pretty_json(value),
    }
}

/// Turns a body as stored by the backend into editable text.
///
/// Older records keep the body as serialized text. A string holding an
/// object or array is read that way and re-indented; an empty string means no
/// body. Every other value, other strings included, goes through
/// [`body_text_from_json`].
#[must_use]
pub fn body_text_from_stored(body: Option<&Value>) -> String {
    match body {
        Some(Value::String(s)) if s.is_empty() => String::new(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(parsed @ (Value::Object(_) | Value::Array(_))) => pretty_json(&parsed),
            _ => body_text_from_json(body),
        },
        other => body_text_from_json(other),
    }
}
