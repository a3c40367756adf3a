//! Workbench Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The variable resolver and request dispatcher
//! - The tab, collection, environment and history stores
//! - The [`Workbench`] facade tying them to persistence

pub mod dispatcher;
pub mod error;
pub mod ports;
pub mod stores;
pub mod variable_resolver;
pub mod workbench;

pub use dispatcher::{Dispatcher, REQUEST_TIMEOUT};
pub use error::{SendError, SendResult};
pub use ports::{
    Clock, HttpClient, HttpClientError, StateSlot, StateStorage, StorageError, TransportBody,
    TransportRequest, TransportResponse,
};
pub use stores::{CollectionStore, EnvironmentStore, HistoryLog, TabSessionManager};
pub use variable_resolver::{VariableResolver, resolve};
pub use workbench::Workbench;
