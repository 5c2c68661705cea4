//! Response display model.
//!
//! Turns whatever the proxy returned into something a front end can render
//! without further branching on raw JSON.

use serde::Serialize;
use serde_json::Value;

use super::ProxyResponse;

/// Emphasis used when rendering a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// 2xx
    Success,
    /// 4xx and 5xx
    Failure,
    /// Everything else (1xx, 3xx, odd codes)
    Neutral,
}

impl StatusClass {
    /// Classifies a status code. Display only; it never affects control flow.
    #[must_use]
    pub const fn of(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            400.. => Self::Failure,
            _ => Self::Neutral,
        }
    }
}

/// A successful proxy response, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessView {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase.
    pub status_text: String,
    /// Round-trip time in milliseconds.
    pub time_ms: f64,
    /// Header name/value pairs, values converted to text.
    pub headers: Vec<(String, String)>,
    /// Pretty-printed body.
    pub body_text: String,
    /// Status emphasis.
    pub class: StatusClass,
}

/// What the response panel shows.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResponseView {
    /// Nothing has been sent yet.
    #[default]
    Empty,
    /// The proxy reported an error; nothing else is meaningful.
    Error {
        /// Message to show.
        message: String,
    },
    /// An upstream response was received.
    Success(SuccessView),
}

impl ResponseView {
    /// Returns true if nothing has been received yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns true if the proxy reported an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns the success view, if any.
    #[must_use]
    pub const fn success(&self) -> Option<&SuccessView> {
        match self {
            Self::Success(view) => Some(view),
            _ => None,
        }
    }
}

/// Builds the display model for an optional proxy response.
#[must_use]
pub fn present(raw: Option<&ProxyResponse>) -> ResponseView {
    match raw {
        None => ResponseView::Empty,
        Some(ProxyResponse::Failure { error }) => ResponseView::Error {
            message: error.clone(),
        },
        Some(ProxyResponse::Success(ok)) => ResponseView::Success(SuccessView {
            status: ok.status,
            status_text: ok.status_text.clone(),
            time_ms: ok.time,
            headers: ok
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), plain_text(v)))
                .collect(),
            body_text: safe_stringify(&ok.body),
            class: StatusClass::of(ok.status),
        }),
    }
}

/// Pretty-prints a body with 2-space indentation, falling back to a plain
/// string conversion if serialization fails.
#[must_use]
pub fn safe_stringify<T: Serialize + ToString + ?Sized>(body: &T) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(plain_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
