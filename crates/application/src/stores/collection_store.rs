//! Collection store: named groups of saved request copies.

use std::sync::Arc;

use tracing::{debug, info};
use workbench_domain::{Collection, CollectionMetadata, Request};

use crate::ports::Clock;

/// Owns every collection and the requests saved into them.
///
/// Requests stored here are copies. Editing a tab never reaches back into a
/// collection and vice versa.
pub struct CollectionStore {
    collections: Vec<Collection>,
    clock: Arc<dyn Clock>,
}

impl CollectionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::from_collections(Vec::new(), clock)
    }

    /// Creates a store over previously persisted collections.
    #[must_use]
    pub fn from_collections(collections: Vec<Collection>, clock: Arc<dyn Clock>) -> Self {
        Self { collections, clock }
    }

    /// Creates a collection and returns its id.
    pub fn create(&mut self, metadata: CollectionMetadata) -> String {
        let collection = Collection::new(metadata, self.clock.now());
        let id = collection.id.clone();
        info!(collection_id = %id, name = %collection.name, "created collection");
        self.collections.push(collection);
        id
    }

    /// Renames a collection. Returns false if it does not exist.
    pub fn rename(&mut self, collection_id: &str, name: impl Into<String>) -> bool {
        let now = self.clock.now();
        self.with_collection(collection_id, |c| {
            c.name = name.into();
            c.touch(now);
        })
    }

    /// Replaces a collection's descriptive fields.
    pub fn update_metadata(&mut self, collection_id: &str, metadata: CollectionMetadata) -> bool {
        let now = self.clock.now();
        self.with_collection(collection_id, |c| c.apply_metadata(metadata, now))
    }

    /// Copies a collection as `"<name> (Copy)"`. Returns the new id.
    ///
    /// The copy and every request in it get fresh ids.
    pub fn duplicate(&mut self, collection_id: &str) -> Option<String> {
        let original = self.get(collection_id)?;
        let copy = original.duplicate(format!("{} (Copy)", original.name), self.clock.now());
        let id = copy.id.clone();
        debug!(from = collection_id, to = %id, "duplicated collection");
        self.collections.push(copy);
        Some(id)
    }

    /// Deletes a collection and its saved requests.
    pub fn delete(&mut self, collection_id: &str) -> bool {
        let before = self.collections.len();
        self.collections.retain(|c| c.id != collection_id);
        let removed = self.collections.len() != before;
        if removed {
            info!(collection_id, "deleted collection");
        }
        removed
    }

    /// Saves a copy of `request` under a fresh id. Returns the saved id.
    pub fn add_request(&mut self, collection_id: &str, request: &Request) -> Option<String> {
        let copy = request.clone().with_fresh_id();
        let id = copy.id.clone();
        let now = self.clock.now();
        self.with_collection(collection_id, |c| {
            c.requests.push(copy);
            c.touch(now);
        })
        .then_some(id)
    }

    /// Removes a saved request. Returns false if either id is unknown.
    pub fn remove_request(&mut self, collection_id: &str, request_id: &str) -> bool {
        let now = self.clock.now();
        let mut removed = false;
        self.with_collection(collection_id, |c| {
            let before = c.requests.len();
            c.requests.retain(|r| r.id != request_id);
            removed = c.requests.len() != before;
            if removed {
                c.touch(now);
            }
        });
        removed
    }

    /// Returns a collection by id.
    #[must_use]
    pub fn get(&self, collection_id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == collection_id)
    }

    /// Returns a saved request.
    #[must_use]
    pub fn find_request(&self, collection_id: &str, request_id: &str) -> Option<&Request> {
        self.get(collection_id)?.find_request(request_id)
    }

    /// Returns all collections in creation order.
    #[must_use]
    pub fn list(&self) -> &[Collection] {
        &self.collections
    }

    fn with_collection(&mut self, collection_id: &str, f: impl FnOnce(&mut Collection)) -> bool {
        match self.collections.iter_mut().find(|c| c.id == collection_id) {
            Some(collection) => {
                f(collection);
                true
            }
            None => false,
        }
    }
}
