//! Header and query parameter rows

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single editable key/value row, used for both headers and params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyValuePair {
    /// Header or parameter name. Rows with a blank key are kept but never sent.
    #[serde(default)]
    pub key: String,
    /// Value, which may contain `{{variables}}`.
    #[serde(default)]
    pub value: String,
}

impl KeyValuePair {
    /// Creates a new row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns true if the trimmed key is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.key.trim().is_empty()
    }
}

/// An ordered list of rows.
///
/// Editing is copy-on-write: the `with_*` methods return a new list and leave
/// `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(transparent)]
pub struct KeyValueList {
    items: Vec<KeyValuePair>,
}

impl KeyValueList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The list shown for a fresh editor: one blank row.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            items: vec![KeyValuePair::default()],
        }
    }

    /// Normalizes either storage shape into ordered rows.
    ///
    /// Accepts a sequence of `{key, value}` objects or a plain `key -> value`
    /// object. The object form keeps the object's insertion order. Returns
    /// `None` for any other shape.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(rows) => Some(rows.iter().filter_map(row_from_json).collect()),
            Value::Object(map) => Some(
                map.iter()
                    .map(|(k, v)| KeyValuePair::new(k.clone(), scalar_text(v)))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Like [`Self::from_json`], but falls back to a single blank row.
    #[must_use]
    pub fn from_json_or_blank(value: Option<&Value>) -> Self {
        value.and_then(Self::from_json).unwrap_or_else(Self::blank)
    }

    /// Returns all rows, including blank ones.
    #[must_use]
    pub fn all(&self) -> &[KeyValuePair] {
        &self.items
    }

    /// Iterates the rows that take part in resolution (non-blank keys).
    pub fn active(&self) -> impl Iterator<Item = &KeyValuePair> {
        self.items.iter().filter(|p| !p.is_blank())
    }

    /// Returns the number of rows.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a copy with the row at `index` replaced. Out-of-range indices
    /// leave the copy unchanged.
    #[must_use]
    pub fn with_updated(&self, index: usize, pair: KeyValuePair) -> Self {
        let mut items = self.items.clone();
        if let Some(slot) = items.get_mut(index) {
            *slot = pair;
        }
        Self { items }
    }

    /// Returns a copy with `pair` appended.
    #[must_use]
    pub fn with_appended(&self, pair: KeyValuePair) -> Self {
        let mut items = self.items.clone();
        items.push(pair);
        Self { items }
    }

    /// Returns a copy without the row at `index`.
    #[must_use]
    pub fn with_removed(&self, index: usize) -> Self {
        Self {
            items: self
                .items
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, p)| p.clone())
                .collect(),
        }
    }
}

impl FromIterator<KeyValuePair> for KeyValueList {
    fn from_iter<T: IntoIterator<Item = KeyValuePair>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for KeyValueList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).ok_or_else(|| {
            serde::de::Error::custom("expected a list of {key, value} rows or a key/value object")
        })
    }
}

fn row_from_json(row: &Value) -> Option<KeyValuePair> {
    let obj = row.as_object()?;
    Some(KeyValuePair::new(
        obj.get("key").map(scalar_text).unwrap_or_default(),
        obj.get("value").map(scalar_text).unwrap_or_default(),
    ))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
