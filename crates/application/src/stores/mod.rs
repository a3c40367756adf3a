//! In-memory stores owned by the workbench.
//!
//! Each store is plain synchronous state. Locking and persistence are the
//! caller's concern.

mod collection_store;
mod environment_store;
mod history_log;
mod tab_session;

pub use collection_store::CollectionStore;
pub use environment_store::{EnvironmentStore, EnvironmentsSnapshot};
pub use history_log::HistoryLog;
pub use tab_session::{SendTicket, TabSessionManager, TabsSnapshot};
