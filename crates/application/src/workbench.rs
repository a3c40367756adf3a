//! Workbench facade
//!
//! Owns the four stores behind a single lock, writes each store back to its
//! storage slot after a mutation, and runs sends through the [`Dispatcher`].
//!
//! The lock is never held across an await. A send locks once to move the
//! tab to sending and snapshot what it needs, unlocks for the network call,
//! then locks again to store the outcome on the same tab id.
//!
//! Writes go through a second, async lock. A slot is snapshotted only after
//! that lock is taken, so saves land in order and the last one carries the
//! latest state.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};
use workbench_domain::{
    Collection, CollectionMetadata, Environment, Request, RequestPatch, Response, Tab,
};

use crate::dispatcher::Dispatcher;
use crate::error::{SendError, SendResult};
use crate::ports::{Clock, HttpClient, StateSlot, StateStorage};
use crate::stores::{
    CollectionStore, EnvironmentStore, EnvironmentsSnapshot, HistoryLog, TabSessionManager,
    TabsSnapshot,
};

struct Stores {
    tabs: TabSessionManager,
    collections: CollectionStore,
    environments: EnvironmentStore,
    history: HistoryLog,
}

impl Stores {
    fn encode(&self, slot: StateSlot) -> Result<Value, serde_json::Error> {
        match slot {
            StateSlot::Tabs => serde_json::to_value(self.tabs.snapshot()),
            StateSlot::Collections => serde_json::to_value(self.collections.list()),
            StateSlot::Environments => serde_json::to_value(self.environments.snapshot()),
            StateSlot::History => serde_json::to_value(self.history.entries()),
        }
    }
}

/// The headless API request workbench.
pub struct Workbench<C: HttpClient, S: StateStorage> {
    dispatcher: Dispatcher<C>,
    storage: S,
    stores: Mutex<Stores>,
    writer: tokio::sync::Mutex<()>,
}

impl<C: HttpClient, S: StateStorage> Workbench<C, S> {
    /// Loads every slot from storage and builds the workbench.
    ///
    /// A missing, unreadable or malformed slot falls back to its default:
    /// no tabs, no collections, the "Local" environment, empty history.
    pub async fn load(client: Arc<C>, storage: S, clock: Arc<dyn Clock>) -> Self {
        let tabs = read_slot::<TabsSnapshot, _>(&storage, StateSlot::Tabs)
            .await
            .map_or_else(TabSessionManager::new, TabSessionManager::from_snapshot);
        let collections = read_slot::<Vec<Collection>, _>(&storage, StateSlot::Collections)
            .await
            .unwrap_or_default();
        let environments = read_slot::<EnvironmentsSnapshot, _>(&storage, StateSlot::Environments)
            .await
            .map_or_else(EnvironmentStore::with_default, EnvironmentStore::from_snapshot);
        let history = read_slot::<Vec<Request>, _>(&storage, StateSlot::History)
            .await
            .map_or_else(HistoryLog::new, HistoryLog::from_entries);

        info!(
            tabs = tabs.len(),
            collections = collections.len(),
            environments = environments.list().len(),
            history = history.len(),
            "workbench loaded"
        );

        Self {
            dispatcher: Dispatcher::new(client),
            storage,
            stores: Mutex::new(Stores {
                tabs,
                collections: CollectionStore::from_collections(collections, clock),
                environments,
                history,
            }),
            writer: tokio::sync::Mutex::new(()),
        }
    }

    // Tabs

    /// Returns all open tabs in order.
    #[must_use]
    pub fn tabs(&self) -> Vec<Tab> {
        self.stores.lock().tabs.tabs().to_vec()
    }

    /// Returns a tab by id.
    #[must_use]
    pub fn tab(&self, tab_id: &str) -> Option<Tab> {
        self.stores.lock().tabs.get(tab_id).cloned()
    }

    /// Returns the active tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<Tab> {
        self.stores.lock().tabs.active().cloned()
    }

    /// Opens a tab on a fresh request or a copy of `request`.
    pub async fn open_tab(&self, request: Option<Request>) -> String {
        self.mutate(&[StateSlot::Tabs], |s| s.tabs.open(request))
            .await
    }

    /// Closes a tab.
    pub async fn close_tab(&self, tab_id: &str) -> bool {
        self.mutate(&[StateSlot::Tabs], |s| s.tabs.close(tab_id))
            .await
    }

    /// Merges a partial edit into a tab's request.
    pub async fn update_tab(&self, tab_id: &str, patch: RequestPatch) -> bool {
        self.mutate(&[StateSlot::Tabs], |s| s.tabs.update(tab_id, patch))
            .await
    }

    /// Makes a tab active.
    pub async fn activate_tab(&self, tab_id: &str) -> bool {
        self.mutate(&[StateSlot::Tabs], |s| s.tabs.activate(tab_id))
            .await
    }

    /// Opens an unsaved copy of a tab's request in a new tab.
    pub async fn duplicate_tab(&self, tab_id: &str) -> Option<String> {
        self.mutate(&[StateSlot::Tabs], |s| s.tabs.duplicate(tab_id))
            .await
    }

    // Sending

    /// Sends the active tab's request.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTab` if no tab is open, otherwise as [`Self::send_tab`].
    pub async fn send_active(&self) -> SendResult<Response> {
        let tab_id = self
            .stores
            .lock()
            .tabs
            .active_id()
            .map(str::to_string)
            .ok_or(SendError::NoActiveTab)?;
        self.send_tab(&tab_id).await
    }

    /// Sends a tab's request under the active environment.
    ///
    /// The request and environment are captured when the send starts. The
    /// response lands on the tab that started it; if that tab was closed in
    /// the meantime the response is only returned. Every attempt is
    /// recorded in history.
    ///
    /// # Errors
    ///
    /// Returns `TabNotFound` for an unknown tab and `AlreadySending` if the
    /// tab already has a request in flight.
    pub async fn send_tab(&self, tab_id: &str) -> SendResult<Response> {
        let (ticket, environment) = {
            let mut stores = self.stores.lock();
            let ticket = stores.tabs.begin_send(tab_id)?;
            (ticket, stores.environments.active().cloned())
        };
        self.persist(&[StateSlot::Tabs]).await;

        let response = self
            .dispatcher
            .send(ticket.request(), environment.as_ref())
            .await;

        {
            let mut stores = self.stores.lock();
            if !stores.tabs.complete_send(&ticket, response.clone()) {
                info!(tab_id = ticket.tab_id(), "tab closed before its response arrived");
            }
            stores.history.record(ticket.into_request());
        }
        self.persist(&[StateSlot::Tabs, StateSlot::History]).await;

        Ok(response)
    }

    // Collections

    /// Returns all collections.
    #[must_use]
    pub fn collections(&self) -> Vec<Collection> {
        self.stores.lock().collections.list().to_vec()
    }

    /// Returns a collection by id.
    #[must_use]
    pub fn collection(&self, collection_id: &str) -> Option<Collection> {
        self.stores.lock().collections.get(collection_id).cloned()
    }

    /// Creates a collection.
    pub async fn create_collection(&self, metadata: CollectionMetadata) -> String {
        self.mutate(&[StateSlot::Collections], |s| s.collections.create(metadata))
            .await
    }

    /// Renames a collection.
    pub async fn rename_collection(&self, collection_id: &str, name: &str) -> bool {
        self.mutate(&[StateSlot::Collections], |s| {
            s.collections.rename(collection_id, name)
        })
        .await
    }

    /// Replaces a collection's descriptive fields.
    pub async fn update_collection_metadata(
        &self,
        collection_id: &str,
        metadata: CollectionMetadata,
    ) -> bool {
        self.mutate(&[StateSlot::Collections], |s| {
            s.collections.update_metadata(collection_id, metadata)
        })
        .await
    }

    /// Duplicates a collection with fresh ids throughout.
    pub async fn duplicate_collection(&self, collection_id: &str) -> Option<String> {
        self.mutate(&[StateSlot::Collections], |s| {
            s.collections.duplicate(collection_id)
        })
        .await
    }

    /// Deletes a collection.
    pub async fn delete_collection(&self, collection_id: &str) -> bool {
        self.mutate(&[StateSlot::Collections], |s| {
            s.collections.delete(collection_id)
        })
        .await
    }

    /// Saves a copy of `request` into a collection.
    pub async fn add_request_to_collection(
        &self,
        collection_id: &str,
        request: &Request,
    ) -> Option<String> {
        self.mutate(&[StateSlot::Collections], |s| {
            s.collections.add_request(collection_id, request)
        })
        .await
    }

    /// Removes a saved request from a collection.
    pub async fn remove_request_from_collection(
        &self,
        collection_id: &str,
        request_id: &str,
    ) -> bool {
        self.mutate(&[StateSlot::Collections], |s| {
            s.collections.remove_request(collection_id, request_id)
        })
        .await
    }

    /// Saves a copy of a tab's request into a collection and marks the tab
    /// saved. Returns the saved request id.
    pub async fn save_tab_to_collection(&self, tab_id: &str, collection_id: &str) -> Option<String> {
        self.mutate(&[StateSlot::Tabs, StateSlot::Collections], |s| {
            let request = s.tabs.get(tab_id)?.request().clone();
            let saved_id = s.collections.add_request(collection_id, &request)?;
            s.tabs.mark_saved(tab_id);
            Some(saved_id)
        })
        .await
    }

    /// Opens a saved request in a new tab.
    pub async fn open_from_collection(&self, collection_id: &str, request_id: &str) -> Option<String> {
        self.mutate(&[StateSlot::Tabs], |s| {
            let request = s.collections.find_request(collection_id, request_id)?.clone();
            Some(s.tabs.open(Some(request)))
        })
        .await
    }

    // Environments

    /// Returns all environments.
    #[must_use]
    pub fn environments(&self) -> Vec<Environment> {
        self.stores.lock().environments.list().to_vec()
    }

    /// Returns the active environment.
    #[must_use]
    pub fn active_environment(&self) -> Option<Environment> {
        self.stores.lock().environments.active().cloned()
    }

    /// Creates an environment.
    pub async fn create_environment(&self, name: &str) -> String {
        self.mutate(&[StateSlot::Environments], |s| s.environments.create(name))
            .await
    }

    /// Renames an environment.
    pub async fn rename_environment(&self, environment_id: &str, name: &str) -> bool {
        self.mutate(&[StateSlot::Environments], |s| {
            s.environments.rename(environment_id, name)
        })
        .await
    }

    /// Deletes an environment.
    pub async fn delete_environment(&self, environment_id: &str) -> bool {
        self.mutate(&[StateSlot::Environments], |s| {
            s.environments.delete(environment_id)
        })
        .await
    }

    /// Activates an environment. Unknown ids are ignored.
    pub async fn set_active_environment(&self, environment_id: &str) -> bool {
        self.mutate(&[StateSlot::Environments], |s| {
            s.environments.set_active(environment_id)
        })
        .await
    }

    /// Sets a variable on an environment.
    pub async fn upsert_variable(
        &self,
        environment_id: &str,
        key: &str,
        value: &str,
        enabled: bool,
    ) -> bool {
        self.mutate(&[StateSlot::Environments], |s| {
            s.environments
                .upsert_variable(environment_id, key, value, enabled)
        })
        .await
    }

    /// Removes a variable from an environment.
    pub async fn remove_variable(&self, environment_id: &str, key: &str) -> bool {
        self.mutate(&[StateSlot::Environments], |s| {
            s.environments.remove_variable(environment_id, key)
        })
        .await
    }

    // History

    /// Returns history entries, newest first.
    #[must_use]
    pub fn history(&self) -> Vec<Request> {
        self.stores.lock().history.entries()
    }

    /// Opens a history entry in a new tab.
    pub async fn open_from_history(&self, index: usize) -> Option<String> {
        self.mutate(&[StateSlot::Tabs], |s| {
            let request = s.history.get(index)?.clone();
            Some(s.tabs.open(Some(request)))
        })
        .await
    }

    /// Removes every history entry.
    pub async fn clear_history(&self) {
        self.mutate(&[StateSlot::History], |s| s.history.clear())
            .await;
    }

    async fn mutate<R>(&self, slots: &[StateSlot], f: impl FnOnce(&mut Stores) -> R) -> R {
        let result = f(&mut self.stores.lock());
        self.persist(slots).await;
        result
    }

    async fn persist(&self, slots: &[StateSlot]) {
        let _writer = self.writer.lock().await;
        let documents: Vec<_> = {
            let stores = self.stores.lock();
            slots.iter().map(|&slot| (slot, stores.encode(slot))).collect()
        };
        for (slot, document) in documents {
            let value = match document {
                Ok(value) => value,
                Err(e) => {
                    warn!(%slot, error = %e, "failed to encode slot");
                    continue;
                }
            };
            if let Err(e) = self.storage.save(slot, &value).await {
                warn!(%slot, error = %e, "failed to persist slot");
            }
        }
    }
}

async fn read_slot<T: DeserializeOwned, S: StateStorage>(storage: &S, slot: StateSlot) -> Option<T> {
    match storage.load(slot).await {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(%slot, error = %e, "malformed slot, using defaults");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(%slot, error = %e, "failed to read slot, using defaults");
            None
        }
    }
}
