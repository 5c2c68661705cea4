//! Environment types
//!
//! An environment is a named, flat set of `{{variable}}` values. Environments
//! are owned by the backend; the client only caches them.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::id::EntityId;

/// Variable name to value mapping.
pub type VariableMap = BTreeMap<String, String>;

/// A named set of variables (e.g. "dev", "staging").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Environment {
    /// Backend identifier.
    #[serde(default)]
    pub id: EntityId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Variable values keyed by name.
    #[serde(default, deserialize_with = "lenient_variables")]
    pub variables: VariableMap,
}

impl Environment {
    /// Creates an environment with the given id and name and no variables.
    #[must_use]
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variables: VariableMap::new(),
        }
    }

    /// Adds a variable, returning the updated environment.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Looks up a variable value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Returns true if the environment has no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Payload for creating an environment on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEnvironment {
    /// Display name.
    pub name: String,
    /// Variable values.
    pub variables: VariableMap,
}

impl NewEnvironment {
    /// Parses the user-entered variables text, which must be a JSON object.
    ///
    /// Returns `None` when the text is not a JSON object.
    #[must_use]
    pub fn parse_variables(text: &str) -> Option<VariableMap> {
        match serde_json::from_str::<Value>(text).ok()? {
            Value::Object(map) => Some(
                map.into_iter()
                    .map(|(k, v)| (k, value_to_text(v)))
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// Converts a JSON scalar to the text substituted for a variable.
fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lenient_variables<'de, D>(deserializer: D) -> Result<VariableMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k, value_to_text(v)))
            .collect(),
        _ => VariableMap::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_environment_builder() {
        let env = Environment::new("1", "dev").with_variable("host", "localhost");
        assert_eq!(env.get("host"), Some("localhost"));
        assert_eq!(env.get("port"), None);
        assert!(!env.is_empty());
    }

    #[test]
    fn test_deserialize_backend_environment() {
        let env: Environment = serde_json::from_str(
            r#"{"id": 7, "name": "DEV", "variables": {"base": "https://x", "retries": 3, "debug": true, "none": null}}"#,
        )
        .unwrap();

        assert_eq!(env.id.as_str(), "7");
        assert_eq!(env.name, "DEV");
        assert_eq!(env.get("base"), Some("https://x"));
        assert_eq!(env.get("retries"), Some("3"));
        assert_eq!(env.get("debug"), Some("true"));
        assert_eq!(env.get("none"), Some(""));
    }

    #[test]
    fn test_missing_or_odd_variables_become_empty() {
        let env: Environment = serde_json::from_str(r#"{"id": "a", "name": "x"}"#).unwrap();
        assert!(env.is_empty());

        let env: Environment =
            serde_json::from_str(r#"{"id": "a", "name": "x", "variables": [1, 2]}"#).unwrap();
        assert!(env.is_empty());
    }

    #[test]
    fn test_parse_variables_text() {
        let vars = NewEnvironment::parse_variables(r#"{"BASE_URL": "https://x", "TOKEN": 123}"#)
            .unwrap();
        assert_eq!(vars.get("BASE_URL").map(String::as_str), Some("https://x"));
        assert_eq!(vars.get("TOKEN").map(String::as_str), Some("123"));

        assert!(NewEnvironment::parse_variables("[1]").is_none());
        assert!(NewEnvironment::parse_variables("not json").is_none());
    }
}
