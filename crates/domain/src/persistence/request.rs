//! Request shape as stored by the backend (history and collection items).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::{HttpMethod, KeyValueList, RequestTemplate, body_text_from_stored};

/// A stored request, accepted in every legacy encoding.
///
/// Headers and params may be a list of `{key, value}` rows or a plain object;
/// the body may be a JSON value or an object or array serialized as text.
/// Nothing here is validated: conversion into a template always succeeds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistedRequest {
    /// Method name as stored; unknown or missing values fall back to GET.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Value>,
    /// Target URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Header rows or object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    /// Param rows or object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Body as JSON value or serialized object/array text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl PersistedRequest {
    /// Returns the stored method, if it names a supported verb.
    #[must_use]
    pub fn method(&self) -> Option<HttpMethod> {
        self.method
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|m| m.parse().ok())
    }

    /// Returns the stored URL or an empty string.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    /// Returns true when no request field is present at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.method.is_none()
            && self.url.is_none()
            && self.headers.is_none()
            && self.params.is_none()
            && self.body.is_none()
    }

    /// Normalizes the stored shape into an editable template.
    #[must_use]
    pub fn to_template(&self) -> RequestTemplate {
        RequestTemplate {
            method: self.method().unwrap_or_default(),
            url: self.url().to_string(),
            headers: KeyValueList::from_json_or_blank(self.headers.as_ref()),
            params: KeyValueList::from_json_or_blank(self.params.as_ref()),
            body: body_text_from_stored(self.body.as_ref()),
        }
    }
}

impl From<&PersistedRequest> for RequestTemplate {
    fn from(raw: &PersistedRequest) -> Self {
        raw.to_template()
    }
}
