//! Variable resolution engine
//!
//! Replaces literal `{{key}}` tokens with environment values in a single
//! left-to-right pass. Substituted text is never rescanned, and when several
//! tokens match at the same position the longest one wins, so the output
//! does not depend on map iteration order.

use courier_domain::environment::{Environment, VariableMap};

use super::parser::parse_variables;

/// Result of variable resolution for a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The resolved string.
    pub resolved: String,

    /// Names of `{{name}}` tokens in the input that have no value.
    pub unresolved: Vec<String>,
}

impl ResolutionResult {
    /// Creates a result for input that needed no substitution.
    #[must_use]
    pub fn unchanged(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            unresolved: Vec::new(),
        }
    }

    /// Returns true if every token in the input was resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Resolves `{{key}}` tokens against one environment's variables.
///
/// Build it once per send and reuse it for the URL, body and every header
/// and param value.
#[derive(Debug, Clone, Default)]
pub struct VariableResolver {
    /// `({{key}}, value)` pairs, longest token first.
    tokens: Vec<(String, String)>,
}

impl VariableResolver {
    /// Creates a resolver for an optional environment.
    #[must_use]
    pub fn new(environment: Option<&Environment>) -> Self {
        environment.map_or_else(Self::default, |env| Self::from_variables(&env.variables))
    }

    /// Creates a resolver from a variable map.
    #[must_use]
    pub fn from_variables(variables: &VariableMap) -> Self {
        let mut tokens: Vec<(String, String)> = variables
            .iter()
            .map(|(key, value)| (format!("{{{{{key}}}}}"), value.clone()))
            .collect();
        tokens.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { tokens }
    }

    /// Returns true if there is nothing to substitute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Substitutes every known token, leaving unknown ones verbatim.
    #[must_use]
    pub fn substitute(&self, input: &str) -> String {
        if self.tokens.is_empty() {
            return input.to_string();
        }

        let mut result = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let tail = &rest[start..];

            if let Some((token, value)) = self
                .tokens
                .iter()
                .find(|(token, _)| tail.starts_with(token.as_str()))
            {
                result.push_str(value);
                rest = &tail[token.len()..];
            } else {
                // Advance by one brace so a token starting at the next
                // character (e.g. `{{{a}}}`) is still found.
                result.push('{');
                rest = &tail[1..];
            }
        }

        result.push_str(rest);
        result
    }

    /// Substitutes tokens and reports which names stayed unresolved.
    #[must_use]
    pub fn resolve(&self, input: &str) -> ResolutionResult {
        let resolved = self.substitute(input);
        let unresolved = self.find_unresolved(input);
        ResolutionResult {
            resolved,
            unresolved,
        }
    }

    /// Lists the token names in `input` that this resolver has no value for.
    ///
    /// A match carrying extra opening braces (`{{{a}}}`, `{{x{{a}}`) is
    /// judged by its innermost name, the one [`Self::substitute`] would see.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        parse_variables(input)
            .into_iter()
            .filter(|r| !self.defines(&r.name))
            .map(|r| innermost(&r.name).to_string())
            .filter(|name| !name.is_empty() && !self.defines(name))
            .collect()
    }

    fn defines(&self, name: &str) -> bool {
        let token = format!("{{{{{name}}}}}");
        self.tokens.iter().any(|(t, _)| *t == token)
    }
}

fn innermost(name: &str) -> &str {
    name.rsplit("{{")
        .next()
        .unwrap_or(name)
        .trim_start_matches('{')
}

/// Resolves `{{key}}` tokens in `text` against an optional environment.
///
/// With no environment, or one without variables, `text` is returned as is.
#[must_use]
pub fn resolve(text: &str, environment: Option<&Environment>) -> String {
    VariableResolver::new(environment).substitute(text)
}
