//! Workbench Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus runtime configuration.

pub mod adapters;
pub mod config;
pub mod http;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::{ConfigError, WorkbenchConfig};
pub use persistence::{FileSlotStorage, InMemorySlotStorage};
pub use serialization::{
    SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
