//! Slot storage adapters.
//!
//! Each workbench slot is one JSON document:
//! - `FileSlotStorage` writes `<slot>.json` files in a data directory
//! - `InMemorySlotStorage` keeps documents in memory

mod file_slot_storage;
mod memory_slot_storage;

pub use file_slot_storage::FileSlotStorage;
pub use memory_slot_storage::InMemorySlotStorage;
