//! Collection type: a named, ordered library of saved requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::request::Request;

/// Presentation metadata supplied when creating or editing a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMetadata {
    /// Collection name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Accent color (CSS color string).
    #[serde(default = "default_color")]
    pub color: String,
    /// Icon name.
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the collection is private to its author.
    #[serde(default)]
    pub is_private: bool,
    /// Author display name.
    #[serde(default)]
    pub author: String,
}

fn default_color() -> String {
    "#3b82f6".to_string()
}

fn default_icon() -> String {
    "folder".to_string()
}

impl CollectionMetadata {
    /// Creates metadata with the given name and default presentation.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: default_color(),
            icon: default_icon(),
            tags: Vec::new(),
            is_private: false,
            author: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Marks the collection private.
    #[must_use]
    pub const fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    /// Sets the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }
}

/// A persisted collection of saved requests.
///
/// Stored requests are independent copies: nothing that happens to the tab a
/// request was saved from reaches them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Unique identifier.
    pub id: String,
    /// Collection name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Saved requests in insertion order.
    #[serde(default)]
    pub requests: Vec<Request>,
    /// Accent color.
    #[serde(default = "default_color")]
    pub color: String,
    /// Icon name.
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the collection is private to its author.
    #[serde(default)]
    pub is_private: bool,
    /// Author display name.
    #[serde(default)]
    pub author: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last structural change.
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    /// Creates an empty collection from metadata, stamped at `now`.
    #[must_use]
    pub fn new(metadata: CollectionMetadata, now: DateTime<Utc>) -> Self {
        let mut collection = Self {
            id: generate_id(),
            name: String::new(),
            description: None,
            requests: Vec::new(),
            color: String::new(),
            icon: String::new(),
            tags: Vec::new(),
            is_private: false,
            author: String::new(),
            created_at: now,
            updated_at: now,
        };
        collection.apply_metadata(metadata, now);
        collection
    }

    /// Returns this collection's presentation metadata.
    #[must_use]
    pub fn metadata(&self) -> CollectionMetadata {
        CollectionMetadata {
            name: self.name.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
            icon: self.icon.clone(),
            tags: self.tags.clone(),
            is_private: self.is_private,
            author: self.author.clone(),
        }
    }

    /// Replaces the presentation metadata and refreshes `updated_at`.
    pub fn apply_metadata(&mut self, metadata: CollectionMetadata, now: DateTime<Utc>) {
        self.name = metadata.name;
        self.description = metadata.description;
        self.color = metadata.color;
        self.icon = metadata.icon;
        self.tags = metadata.tags;
        self.is_private = metadata.is_private;
        self.author = metadata.author;
        self.touch(now);
    }

    /// Refreshes `updated_at`.
    pub const fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Finds a saved request by id.
    #[must_use]
    pub fn find_request(&self, request_id: &str) -> Option<&Request> {
        self.requests.iter().find(|r| r.id == request_id)
    }

    /// Returns a deep copy under a fresh id, with every request re-identified.
    #[must_use]
    pub fn duplicate(&self, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            requests: self
                .requests
                .iter()
                .cloned()
                .map(Request::with_fresh_id)
                .collect(),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_new_collection_takes_metadata() {
        let meta = CollectionMetadata::new("My API")
            .with_description("Users service")
            .with_tag("internal")
            .with_author("ana")
            .private();
        let collection = Collection::new(meta.clone(), at(100));

        assert_eq!(collection.metadata(), meta);
        assert_eq!(collection.created_at, at(100));
        assert_eq!(collection.updated_at, at(100));
        assert!(collection.requests.is_empty());
    }

    #[test]
    fn test_duplicate_reassigns_all_ids() {
        let mut original = Collection::new(CollectionMetadata::new("Orig"), at(1));
        original.requests.push(Request::get("A", "http://a"));
        original.requests.push(Request::get("B", "http://b"));

        let copy = original.duplicate("Orig (Copy)", at(2));

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.requests.len(), 2);
        for (a, b) in copy.requests.iter().zip(&original.requests) {
            assert_ne!(a.id, b.id);
            assert_eq!(a.url, b.url);
        }
        assert_eq!(copy.created_at, at(2));
        assert_eq!(copy.color, original.color);
    }

    #[test]
    fn test_missing_presentation_fields_default() {
        let json = r#"{"id":"c1","name":"Bare","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}"#;
        let collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.name, "Bare");
        assert_eq!(collection.icon, "folder");
        assert!(!collection.is_private);
    }
}
