//! Environment variable types

use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// Name of the environment created when none are persisted.
pub const DEFAULT_ENVIRONMENT_NAME: &str = "Local";

/// A single variable with its value and enabled flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name, referenced as `{{key}}`.
    #[serde(default)]
    pub key: String,
    /// Substituted value.
    #[serde(default)]
    pub value: String,
    /// Whether this variable takes part in resolution.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl Variable {
    /// Creates an enabled variable.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled variable.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: false,
        }
    }

    /// Returns the value if this variable participates in resolution:
    /// enabled and with a non-empty key.
    #[must_use]
    pub fn enabled_value(&self) -> Option<&str> {
        (self.enabled && !self.key.is_empty()).then_some(self.value.as_str())
    }
}

/// A named, ordered set of variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier.
    pub id: String,
    /// Display name (e.g. "Local", "Production").
    pub name: String,
    /// Variables in insertion order.
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Creates the "Local" environment with example variables.
    #[must_use]
    pub fn local() -> Self {
        Self::new(DEFAULT_ENVIRONMENT_NAME)
            .with_variable(Variable::new("baseUrl", "http://localhost:3000"))
            .with_variable(Variable::new("apiKey", "your-api-key-here"))
    }

    /// Appends a variable.
    #[must_use]
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Updates the first variable named `key`, or appends a new one.
    ///
    /// Keys are not validated; an empty key is stored but never resolved.
    pub fn upsert_variable(&mut self, key: &str, value: impl Into<String>, enabled: bool) {
        let value = value.into();
        if let Some(existing) = self.variables.iter_mut().find(|v| v.key == key) {
            existing.value = value;
            existing.enabled = enabled;
        } else {
            self.variables.push(Variable {
                key: key.to_string(),
                value,
                enabled,
            });
        }
    }

    /// Removes every variable named `key`. Returns true if any was removed.
    pub fn remove_variable(&mut self, key: &str) -> bool {
        let before = self.variables.len();
        self.variables.retain(|v| v.key != key);
        self.variables.len() != before
    }

    /// Gets the first variable named `key`, enabled or not.
    #[must_use]
    pub fn get_variable(&self, key: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.key == key)
    }

    /// Resolves a placeholder name. The first enabled variable with that key
    /// wins; disabled and empty-key entries are skipped.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .filter(|v| v.key == name)
            .find_map(Variable::enabled_value)
    }

    /// Returns the number of variables, enabled or not.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_variable_disabled() {
        let var = Variable::disabled("host", "localhost");
        assert!(!var.enabled);
        assert_eq!(var.enabled_value(), None);
    }

    #[test]
    fn test_empty_key_never_resolves() {
        let var = Variable::new("", "value");
        assert_eq!(var.enabled_value(), None);

        let env = Environment::new("Test").with_variable(var);
        assert_eq!(env.resolve(""), None);
    }

    #[test]
    fn test_local_environment_has_examples() {
        let env = Environment::local();
        assert_eq!(env.name, DEFAULT_ENVIRONMENT_NAME);
        assert_eq!(env.resolve("baseUrl"), Some("http://localhost:3000"));
        assert!(env.variable_count() >= 2);
    }

    #[test]
    fn test_upsert_updates_in_place() {
        let mut env = Environment::new("Test");
        env.upsert_variable("host", "localhost", true);
        env.upsert_variable("port", "8080", true);
        env.upsert_variable("host", "example.com", false);

        assert_eq!(env.variable_count(), 2);
        assert_eq!(env.variables[0].key, "host");
        assert_eq!(env.variables[0].value, "example.com");
        assert_eq!(env.resolve("host"), None);
        assert_eq!(env.resolve("port"), Some("8080"));
    }

    #[test]
    fn test_first_enabled_duplicate_wins() {
        let env = Environment::new("Test")
            .with_variable(Variable::disabled("host", "a"))
            .with_variable(Variable::new("host", "b"))
            .with_variable(Variable::new("host", "c"));
        assert_eq!(env.resolve("host"), Some("b"));
    }

    #[test]
    fn test_remove_variable() {
        let mut env = Environment::new("Test").with_variable(Variable::new("host", "x"));
        assert!(env.remove_variable("host"));
        assert!(!env.remove_variable("host"));
        assert_eq!(env.variable_count(), 0);
    }
}
