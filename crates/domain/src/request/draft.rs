//! Editable draft state

use super::template::parse_body;
use super::{HttpMethod, KeyValuePair, RequestTemplate};

/// The request currently being edited, plus edit-time body validation.
///
/// The JSON flag is a convenience for immediate feedback. It is never a
/// substitute for validating the body again before send/export/save.
/// `{{variable}}` tokens are treated as values while editing, so a body like
/// `{"id": {{userId}}}` is not flagged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestDraft {
    template: RequestTemplate,
    json_error: Option<String>,
}

impl RequestDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a draft from an existing template, validating its body.
    #[must_use]
    pub fn from_template(template: RequestTemplate) -> Self {
        let json_error = validate(&template.body);
        Self {
            template,
            json_error,
        }
    }

    /// Returns the underlying template.
    #[must_use]
    pub const fn template(&self) -> &RequestTemplate {
        &self.template
    }

    /// Returns the edit-time JSON error, if the body failed to parse.
    #[must_use]
    pub fn json_error(&self) -> Option<&str> {
        self.json_error.as_deref()
    }

    /// Replaces the whole template (loading from history, a collection or a file).
    pub fn load(&mut self, template: RequestTemplate) {
        *self = Self::from_template(template);
    }

    /// Sets the URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.template.url = url.into();
    }

    /// Sets the method.
    pub const fn set_method(&mut self, method: HttpMethod) {
        self.template.method = method;
    }

    /// Replaces the body text and re-validates it.
    pub fn edit_body(&mut self, body: impl Into<String>) {
        self.template.body = body.into();
        self.json_error = validate(&self.template.body);
    }

    /// Replaces the header row at `index`.
    pub fn update_header(&mut self, index: usize, pair: KeyValuePair) {
        self.template.headers = self.template.headers.with_updated(index, pair);
    }

    /// Appends a blank header row.
    pub fn add_header(&mut self) {
        self.template.headers = self.template.headers.with_appended(KeyValuePair::default());
    }

    /// Removes the header row at `index`.
    pub fn remove_header(&mut self, index: usize) {
        self.template.headers = self.template.headers.with_removed(index);
    }

    /// Replaces the param row at `index`.
    pub fn update_param(&mut self, index: usize, pair: KeyValuePair) {
        self.template.params = self.template.params.with_updated(index, pair);
    }

    /// Appends a blank param row.
    pub fn add_param(&mut self) {
        self.template.params = self.template.params.with_appended(KeyValuePair::default());
    }

    /// Removes the param row at `index`.
    pub fn remove_param(&mut self, index: usize) {
        self.template.params = self.template.params.with_removed(index);
    }
}

fn validate(body: &str) -> Option<String> {
    if parse_body(body).is_ok() || parse_body(&mask_placeholders(body)).is_ok() {
        None
    } else {
        Some("Invalid JSON".to_string())
    }
}

/// Replaces every `{{...}}` token with `0`.
fn mask_placeholders(text: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let inner = &rest[start + 2..];
        match inner.find("}}") {
            Some(end) if end > 0 => {
                masked.push_str(&rest[..start]);
                masked.push('0');
                rest = &inner[end + 2..];
            }
            _ => break,
        }
    }
    masked.push_str(rest);
    masked
}
