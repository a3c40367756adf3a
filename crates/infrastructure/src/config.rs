//! Runtime configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `WORKBENCH_DATA_DIR` | `<platform config dir>/workbench` |
//! | `WORKBENCH_USER_AGENT` | `workbench/<version>` |
//! | `WORKBENCH_LOG` | falls back to `RUST_LOG`, then `info` |

use std::path::PathBuf;

use thiserror::Error;

/// Environment variable naming the data directory.
pub const DATA_DIR_VAR: &str = "WORKBENCH_DATA_DIR";

/// Environment variable overriding the `User-Agent`.
pub const USER_AGENT_VAR: &str = "WORKBENCH_USER_AGENT";

/// Environment variable holding the log filter.
pub const LOG_VAR: &str = "WORKBENCH_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No data directory was configured and the platform has none.
    #[error("Could not determine config directory; set {DATA_DIR_VAR}")]
    NoConfigDir,
}

/// Workbench runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbenchConfig {
    /// Directory holding the slot files.
    pub data_dir: PathBuf,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Log filter directive.
    pub log_filter: String,
}

impl WorkbenchConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `NoConfigDir` if no data directory can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `NoConfigDir` if no data directory can be determined.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = match get(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir().ok_or(ConfigError::NoConfigDir)?,
        };

        Ok(Self {
            data_dir,
            user_agent: get(USER_AGENT_VAR).unwrap_or_else(default_user_agent),
            log_filter: get(LOG_VAR)
                .or_else(|| get("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

/// Returns `<platform config dir>/workbench`.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("workbench"))
}

fn default_user_agent() -> String {
    format!("workbench/{}", env!("CARGO_PKG_VERSION"))
}
