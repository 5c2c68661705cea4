//! Variable parser for {{variable}} syntax
//!
//! Finds `{{name}}` tokens and their positions. Names are taken literally:
//! no trimming, no validation.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.+?)\}\}").expect("valid regex"));

/// A `{{name}}` token found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name, exactly as written between the braces.
    pub name: String,

    /// Byte range of the whole token in the original string.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Extracts every `{{name}}` token, left to right, without overlaps.
///
/// # Examples
///
/// ```
/// use courier_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("{{base}}/users/{{ id }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "base");
/// assert_eq!(refs[1].name, " id ");
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    TOKEN
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(VariableReference::new(name.as_str(), whole.range()))
        })
        .collect()
}

/// Returns true if the input contains at least one `{{name}}` token.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    TOKEN.is_match(input)
}

/// Extracts just the variable names.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    parse_variables(input).into_iter().map(|r| r.name).collect()
}
