//! Environment store: named variable sets and the active selection.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use workbench_domain::Environment;

/// Persisted shape of the environment store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentsSnapshot {
    /// Environments in creation order.
    #[serde(default)]
    pub environments: Vec<Environment>,
    /// Id of the active environment.
    #[serde(default)]
    pub active_environment_id: Option<String>,
}

/// Environments plus the id of the one used for resolution.
///
/// The active id always names an existing environment or is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentStore {
    environments: Vec<Environment>,
    active_id: Option<String>,
}

impl Default for EnvironmentStore {
    fn default() -> Self {
        Self::with_default()
    }
}

impl EnvironmentStore {
    /// Creates a store holding the active "Local" environment.
    #[must_use]
    pub fn with_default() -> Self {
        let local = Environment::local();
        let active_id = Some(local.id.clone());
        Self {
            environments: vec![local],
            active_id,
        }
    }

    /// Restores a store from its persisted shape. A dangling active id is
    /// dropped.
    #[must_use]
    pub fn from_snapshot(snapshot: EnvironmentsSnapshot) -> Self {
        let environments = snapshot.environments;
        let active_id = snapshot
            .active_environment_id
            .filter(|id| environments.iter().any(|e| &e.id == id));
        Self {
            environments,
            active_id,
        }
    }

    /// Returns the persisted shape of this store.
    #[must_use]
    pub fn snapshot(&self) -> EnvironmentsSnapshot {
        EnvironmentsSnapshot {
            environments: self.environments.clone(),
            active_environment_id: self.active_id.clone(),
        }
    }

    /// Creates an empty environment and returns its id. It is not activated.
    pub fn create(&mut self, name: impl Into<String>) -> String {
        let environment = Environment::new(name);
        let id = environment.id.clone();
        info!(environment_id = %id, name = %environment.name, "created environment");
        self.environments.push(environment);
        id
    }

    /// Renames an environment.
    pub fn rename(&mut self, environment_id: &str, name: impl Into<String>) -> bool {
        self.with_environment(environment_id, |env| env.name = name.into())
    }

    /// Deletes an environment. Deleting the active one leaves none active.
    pub fn delete(&mut self, environment_id: &str) -> bool {
        let before = self.environments.len();
        self.environments.retain(|e| e.id != environment_id);
        if self.environments.len() == before {
            return false;
        }
        if self.active_id.as_deref() == Some(environment_id) {
            self.active_id = None;
        }
        info!(environment_id, "deleted environment");
        true
    }

    /// Activates an environment. Unknown ids are ignored and return false.
    pub fn set_active(&mut self, environment_id: &str) -> bool {
        if self.get(environment_id).is_none() {
            return false;
        }
        debug!(environment_id, "activated environment");
        self.active_id = Some(environment_id.to_string());
        true
    }

    /// Leaves no environment active. Variables then resolve to nothing.
    pub fn clear_active(&mut self) {
        self.active_id = None;
    }

    /// Sets a variable on an environment, adding it if missing.
    pub fn upsert_variable(
        &mut self,
        environment_id: &str,
        key: &str,
        value: impl Into<String>,
        enabled: bool,
    ) -> bool {
        self.with_environment(environment_id, |env| env.upsert_variable(key, value, enabled))
    }

    /// Removes a variable from an environment.
    pub fn remove_variable(&mut self, environment_id: &str, key: &str) -> bool {
        self.environments
            .iter_mut()
            .find(|e| e.id == environment_id)
            .is_some_and(|env| env.remove_variable(key))
    }

    /// Returns the active environment.
    #[must_use]
    pub fn active(&self) -> Option<&Environment> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Returns the active environment id.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Returns an environment by id.
    #[must_use]
    pub fn get(&self, environment_id: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.id == environment_id)
    }

    /// Returns all environments.
    #[must_use]
    pub fn list(&self) -> &[Environment] {
        &self.environments
    }

    fn with_environment(&mut self, environment_id: &str, f: impl FnOnce(&mut Environment)) -> bool {
        match self.environments.iter_mut().find(|e| e.id == environment_id) {
            Some(environment) => {
                f(environment);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use workbench_domain::DEFAULT_ENVIRONMENT_NAME;

    #[test]
    fn test_default_is_active_local() {
        let store = EnvironmentStore::with_default();
        let active = store.active().expect("local should be active");
        assert_eq!(active.name, DEFAULT_ENVIRONMENT_NAME);
        assert_eq!(active.resolve("baseUrl"), Some("http://localhost:3000"));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_set_active_unknown_is_noop() {
        let mut store = EnvironmentStore::with_default();
        let before = store.active_id().map(str::to_string);
        assert!(!store.set_active("missing"));
        assert_eq!(store.active_id().map(str::to_string), before);
    }

    #[test]
    fn test_upsert_updates_then_appends() {
        let mut store = EnvironmentStore::with_default();
        let id = store.create("Staging");

        assert!(store.upsert_variable(&id, "host", "a", true));
        assert!(store.upsert_variable(&id, "host", "b", false));
        assert!(store.upsert_variable(&id, "port", "8080", true));

        let env = store.get(&id).expect("env should exist");
        assert_eq!(env.variable_count(), 2);
        assert_eq!(env.resolve("host"), None);
        assert_eq!(env.resolve("port"), Some("8080"));
        assert!(!store.upsert_variable("missing", "k", "v", true));
    }

    #[test]
    fn test_remove_variable() {
        let mut store = EnvironmentStore::with_default();
        let id = store.active_id().map(str::to_string).expect("active id");
        assert!(store.remove_variable(&id, "apiKey"));
        assert!(!store.remove_variable(&id, "apiKey"));
    }

    #[test]
    fn test_delete_active_clears_selection() {
        let mut store = EnvironmentStore::with_default();
        let staging = store.create("Staging");
        let local = store.active_id().map(str::to_string).expect("active id");

        assert!(store.delete(&staging));
        assert_eq!(store.active_id(), Some(local.as_str()));

        assert!(store.delete(&local));
        assert_eq!(store.active(), None);
        assert!(!store.delete(&local));
    }

    #[test]
    fn test_rename_and_switch() {
        let mut store = EnvironmentStore::with_default();
        let id = store.create("Prod");
        assert!(store.rename(&id, "Production"));
        assert!(store.set_active(&id));
        assert_eq!(store.active().map(|e| e.name.as_str()), Some("Production"));
    }

    #[test]
    fn test_snapshot_drops_dangling_active() {
        let snapshot = EnvironmentsSnapshot {
            environments: vec![Environment::new("A")],
            active_environment_id: Some("gone".to_string()),
        };
        let store = EnvironmentStore::from_snapshot(snapshot);
        assert_eq!(store.active_id(), None);
        assert_eq!(store.list().len(), 1);
    }
}
