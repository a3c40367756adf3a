//! Key/value rows used for headers and query parameters.

use serde::{Deserialize, Serialize};

/// A single editable key/value row.
///
/// Disabled rows are kept so user edits survive toggling, but they are never
/// sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Header name or parameter key.
    #[serde(default)]
    pub key: String,
    /// Header or parameter value. May contain `{{variable}}` placeholders.
    #[serde(default)]
    pub value: String,
    /// Whether this row takes part in dispatch.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl KeyValue {
    /// Creates a new enabled row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a new disabled row.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: false,
        }
    }

    /// Creates the empty, enabled placeholder row editors start with.
    #[must_use]
    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// Returns true if this row should be sent: enabled with a non-empty key.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.trim().is_empty()
    }
}

impl Default for KeyValue {
    fn default() -> Self {
        Self::blank()
    }
}

/// An ordered list of key/value rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyValueList {
    items: Vec<KeyValue>,
}

impl KeyValueList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates a list holding a single blank row.
    #[must_use]
    pub fn with_blank_row() -> Self {
        Self {
            items: vec![KeyValue::blank()],
        }
    }

    /// Appends a row.
    pub fn add(&mut self, item: KeyValue) {
        self.items.push(item);
    }

    /// Returns an iterator over rows that take part in dispatch.
    pub fn active(&self) -> impl Iterator<Item = &KeyValue> {
        self.items.iter().filter(|kv| kv.is_active())
    }

    /// Returns all rows (enabled and disabled).
    #[must_use]
    pub fn all(&self) -> &[KeyValue] {
        &self.items
    }

    /// Returns the number of rows.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<KeyValue> for KeyValueList {
    fn from_iter<T: IntoIterator<Item = KeyValue>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<KeyValue>> for KeyValueList {
    fn from(items: Vec<KeyValue>) -> Self {
        Self { items }
    }
}
