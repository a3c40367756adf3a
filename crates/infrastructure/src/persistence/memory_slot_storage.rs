//! In-memory slot storage for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use workbench_application::ports::{StateSlot, StateStorage, StorageError};

/// Storage that keeps slots in memory. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct InMemorySlotStorage {
    slots: Arc<RwLock<HashMap<StateSlot, Value>>>,
}

impl InMemorySlotStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of a stored slot.
    #[must_use]
    pub fn get(&self, slot: StateSlot) -> Option<Value> {
        self.slots.read().get(&slot).cloned()
    }

    /// Stores a slot directly, bypassing the port.
    pub fn insert(&self, slot: StateSlot, value: Value) {
        self.slots.write().insert(slot, value);
    }
}

impl StateStorage for InMemorySlotStorage {
    async fn load(&self, slot: StateSlot) -> Result<Option<Value>, StorageError> {
        Ok(self.get(slot))
    }

    async fn save(&self, slot: StateSlot, value: &Value) -> Result<(), StorageError> {
        self.insert(slot, value.clone());
        Ok(())
    }
}
