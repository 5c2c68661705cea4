//! Export, import and save-to-collection documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::request::{HttpMethod, KeyValueList, RequestTemplate, body_text_from_json};

/// Default file name for exported requests.
pub const EXPORT_FILE_NAME: &str = "api-request.json";

/// The JSON document written when a request is exported to a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// HTTP method.
    pub method: HttpMethod,
    /// Unresolved URL.
    pub url: String,
    /// Header rows, blank rows included.
    pub headers: KeyValueList,
    /// Param rows, blank rows included.
    pub params: KeyValueList,
    /// Parsed body, `null` when the template has none.
    pub body: Option<Value>,
    /// When the export happened.
    #[serde(rename = "exportedAt")]
    pub exported_at: DateTime<Utc>,
}

impl ExportDocument {
    /// Builds the export document for a template.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if the body is not valid JSON; an
    /// unparseable body is never silently dropped.
    pub fn from_template(template: &RequestTemplate, exported_at: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            method: template.method,
            url: template.url.clone(),
            headers: template.headers.clone(),
            params: template.params.clone(),
            body: template.parsed_body()?,
            exported_at,
        })
    }
}

/// The request shape posted when saving to a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorableRequest {
    /// Unresolved URL.
    pub url: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Header rows.
    pub headers: KeyValueList,
    /// Param rows.
    pub params: KeyValueList,
    /// Parsed body, `null` when the template has none.
    pub body: Option<Value>,
}

impl StorableRequest {
    /// Builds the storable form of a template.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if the body is not valid JSON.
    pub fn from_template(template: &RequestTemplate) -> DomainResult<Self> {
        Ok(Self {
            url: template.url.clone(),
            method: template.method,
            headers: template.headers.clone(),
            params: template.params.clone(),
            body: template.parsed_body()?,
        })
    }
}

/// Builds a template from an imported JSON document.
///
/// `url` and `method` must be non-empty strings, and the method must be a
/// supported verb. Headers and params fall back to one blank row when absent
/// or unrecognized; `exportedAt` and unknown fields are ignored.
///
/// # Errors
///
/// Returns `DomainError::MalformedImport` when a required field is missing,
/// in which case nothing is produced.
pub fn from_imported(json: &Value) -> DomainResult<RequestTemplate> {
    let url = required_text(json, "url")?;
    let method = required_text(json, "method")?;
    let method: HttpMethod = method
        .parse()
        .map_err(|_| DomainError::MalformedImport(format!("unsupported method `{method}`")))?;

    Ok(RequestTemplate {
        method,
        url: url.to_string(),
        headers: KeyValueList::from_json_or_blank(json.get("headers")),
        params: KeyValueList::from_json_or_blank(json.get("params")),
        body: body_text_from_json(json.get("body")),
    })
}

fn required_text<'a>(json: &'a Value, field: &str) -> DomainResult<&'a str> {
    json.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DomainError::MalformedImport(format!("missing `{field}`")))
}
