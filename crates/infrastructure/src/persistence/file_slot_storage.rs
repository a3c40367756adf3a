//! File-backed slot storage.
//!
//! Stores each slot as `<data_dir>/<slot>.json` in stable JSON
//! (two-space indent, trailing newline). Every save writes its own hidden
//! temp file and renames it into place.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;
use workbench_application::ports::{StateSlot, StateStorage, StorageError};

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

impl From<SerializationError> for StorageError {
    fn from(error: SerializationError) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Storage that keeps one JSON file per slot.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    data_dir: PathBuf,
}

impl FileSlotStorage {
    /// Creates storage rooted at `data_dir`. The directory is created on
    /// first write.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the file backing a slot.
    #[must_use]
    pub fn slot_path(&self, slot: StateSlot) -> PathBuf {
        self.data_dir.join(format!("{}.json", slot.key()))
    }
}

impl StateStorage for FileSlotStorage {
    async fn load(&self, slot: StateSlot) -> Result<Option<Value>, StorageError> {
        let path = self.slot_path(slot);
        let content = match fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = from_json_bytes(&content)?;
        debug!(%slot, path = %path.display(), "loaded slot");
        Ok(Some(value))
    }

    async fn save(&self, slot: StateSlot, value: &Value) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir).await?;

        let path = self.slot_path(slot);
        let temp = self
            .data_dir
            .join(format!(".{}.{}.tmp", slot.key(), Uuid::now_v7().simple()));
        if let Err(e) = write_then_rename(&temp, &path, &to_json_stable_bytes(value)?).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }

        debug!(%slot, path = %path.display(), "saved slot");
        Ok(())
    }
}

/// Writes `bytes` to `temp`, then moves it over `path`.
async fn write_then_rename(temp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(temp, bytes).await?;
    fs::rename(temp, path).await
}
