//! Storage port for the persisted workbench slots

use std::fmt;
use std::future::Future;

use serde_json::Value;
use thiserror::Error;

/// One independently persisted piece of workbench state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateSlot {
    /// Open tabs and the active tab id.
    Tabs,
    /// Saved collections.
    Collections,
    /// Environments and the active environment id.
    Environments,
    /// Request history.
    History,
}

impl StateSlot {
    /// All slots in load order.
    pub const ALL: [Self; 4] = [
        Self::Tabs,
        Self::Collections,
        Self::Environments,
        Self::History,
    ];

    /// Returns the storage key for this slot.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Tabs => "tabs",
            Self::Collections => "collections",
            Self::Environments => "environments",
            Self::History => "history",
        }
    }
}

impl fmt::Display for StateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors from a [`StateStorage`] adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error while reading or writing a slot.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored slot is not valid JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The storage location could not be determined.
    #[error("Storage location unavailable: {0}")]
    Unavailable(String),
}

/// Port for persisting workbench slots as JSON documents.
pub trait StateStorage: Send + Sync {
    /// Loads a slot. Returns `Ok(None)` if the slot was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read or parsed.
    fn load(
        &self,
        slot: StateSlot,
    ) -> impl Future<Output = Result<Option<Value>, StorageError>> + Send;

    /// Replaces the contents of a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    fn save(
        &self,
        slot: StateSlot,
        value: &Value,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}
