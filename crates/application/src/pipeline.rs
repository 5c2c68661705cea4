//! Request resolution pipeline
//!
//! Turns the draft plus the selected environment into the payload sent to
//! the proxy.

use std::collections::BTreeMap;

use courier_domain::{
    DomainError, DomainResult, Environment, KeyValueList, RequestDraft, ResolvedRequest,
    request::parse_body,
};
use tracing::debug;

use crate::variable_resolver::VariableResolver;

/// Resolves a draft into an executable request.
///
/// Fails fast, before anything is sent:
/// - `MissingUrl` when the trimmed URL is empty;
/// - `InvalidBody` when the edit-time JSON check failed, or when the body no
///   longer parses after substitution.
///
/// # Errors
///
/// Returns the first validation error encountered.
pub fn resolve_request(
    draft: &RequestDraft,
    environment: Option<&Environment>,
) -> DomainResult<ResolvedRequest> {
    let template = draft.template();

    if template.url.trim().is_empty() {
        return Err(DomainError::MissingUrl);
    }
    if let Some(error) = draft.json_error() {
        return Err(DomainError::InvalidBody(error.to_string()));
    }

    let resolver = VariableResolver::new(environment);

    let url = resolver.resolve(&template.url);
    if !url.is_complete() {
        debug!(unresolved = ?url.unresolved, "URL has unresolved variables");
    }

    let body = if template.body.is_empty() {
        None
    } else {
        let text = resolver.resolve(&template.body);
        if !text.is_complete() {
            debug!(unresolved = ?text.unresolved, "body has unresolved variables");
        }
        parse_body(&text.resolved)?
    };

    let headers = resolve_pairs(&resolver, &template.headers);
    let params = resolve_pairs(&resolver, &template.params);
    debug!(
        headers = headers.len(),
        params = params.len(),
        has_body = body.is_some(),
        "request resolved"
    );

    Ok(ResolvedRequest {
        url: url.resolved,
        method: template.method,
        headers,
        params,
        body,
    })
}

/// Resolves the values of all rows with a non-blank key. Later rows with the
/// same key overwrite earlier ones.
fn resolve_pairs(resolver: &VariableResolver, pairs: &KeyValueList) -> BTreeMap<String, String> {
    pairs
        .active()
        .map(|pair| (pair.key.clone(), resolver.substitute(&pair.value)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use courier_domain::{HttpMethod, KeyValuePair, RequestTemplate};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rows(pairs: &[(&str, &str)]) -> KeyValueList {
        pairs.iter().map(|(k, v)| KeyValuePair::new(*k, *v)).collect()
    }

    fn dev() -> Environment {
        Environment::new("1", "dev")
            .with_variable("base", "https://api.x.com")
            .with_variable("token", "abc")
            .with_variable("userId", "42")
    }

    #[test]
    fn test_resolves_url_and_headers() {
        let template = RequestTemplate::new(HttpMethod::Get, "{{base}}/users")
            .with_headers(rows(&[("Authorization", "Bearer {{token}}")]));
        let draft = RequestDraft::from_template(template);

        let resolved = resolve_request(&draft, Some(&dev())).unwrap();

        assert_eq!(resolved.url, "https://api.x.com/users");
        assert_eq!(resolved.method, HttpMethod::Get);
        assert_eq!(
            resolved.headers,
            BTreeMap::from([("Authorization".to_string(), "Bearer abc".to_string())])
        );
        assert!(resolved.params.is_empty());
        assert_eq!(resolved.body, None);
    }

    #[test]
    fn test_body_substitution_before_parse() {
        let template = RequestTemplate::new(HttpMethod::Post, "{{base}}/users")
            .with_body(r#"{"id": {{userId}}}"#);
        let draft = RequestDraft::from_template(template);

        let resolved = resolve_request(&draft, Some(&dev())).unwrap();
        assert_eq!(resolved.body, Some(json!({"id": 42})));

        let err = resolve_request(&draft, None).unwrap_err();
        assert!(matches!(err, DomainError::InvalidBody(_)));
    }

    #[test]
    fn test_body_with_string_placeholder() {
        let template = RequestTemplate::new(HttpMethod::Post, "u")
            .with_body(r#"{"name": "{{user}}", "n": 1}"#);
        let draft = RequestDraft::from_template(template);
        let env = Environment::new("1", "dev").with_variable("user", "ada");

        let resolved = resolve_request(&draft, Some(&env)).unwrap();
        assert_eq!(resolved.body, Some(json!({"name": "ada", "n": 1})));
    }

    #[test]
    fn test_missing_url() {
        let draft = RequestDraft::from_template(RequestTemplate::new(HttpMethod::Get, "   "));
        assert_eq!(resolve_request(&draft, None), Err(DomainError::MissingUrl));
    }

    #[test]
    fn test_edit_time_flag_blocks_send() {
        let mut draft = RequestDraft::from_template(RequestTemplate::new(HttpMethod::Post, "u"));
        draft.edit_body("{broken");
        assert!(matches!(
            resolve_request(&draft, None),
            Err(DomainError::InvalidBody(_))
        ));
    }

    #[test]
    fn test_last_write_wins_and_blank_keys_skipped() {
        let template = RequestTemplate::new(HttpMethod::Get, "u")
            .with_headers(rows(&[("X", "1"), ("  ", "ignored"), ("X", "2")]))
            .with_params(rows(&[("", "nope"), ("page", "{{userId}}")]));
        let draft = RequestDraft::from_template(template);

        let resolved = resolve_request(&draft, Some(&dev())).unwrap();

        assert_eq!(
            resolved.headers,
            BTreeMap::from([("X".to_string(), "2".to_string())])
        );
        assert_eq!(
            resolved.params,
            BTreeMap::from([("page".to_string(), "42".to_string())])
        );
    }

    #[test]
    fn test_no_environment_keeps_tokens() {
        let draft = RequestDraft::from_template(RequestTemplate::new(HttpMethod::Get, "{{base}}"));
        let resolved = resolve_request(&draft, None).unwrap();
        assert_eq!(resolved.url, "{{base}}");
    }
}
