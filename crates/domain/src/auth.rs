//! Authentication configuration types

use serde::{Deserialize, Serialize};

/// Authentication applied on top of a request's own headers.
///
/// Every string may contain `{{variable}}` placeholders; they are resolved at
/// dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Auth {
    /// No authentication.
    #[default]
    None,
    /// `Authorization: Bearer <token>`.
    Bearer {
        /// The bearer token.
        #[serde(default)]
        token: String,
    },
    /// `Authorization: Basic base64(username:password)`.
    Basic {
        /// Username.
        #[serde(default)]
        username: String,
        /// Password.
        #[serde(default)]
        password: String,
    },
    /// A header named `key` carrying `value`.
    ApiKey {
        /// Header name.
        #[serde(default)]
        key: String,
        /// Header value.
        #[serde(default)]
        value: String,
    },
}

impl Auth {
    /// Creates bearer token authentication.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Creates basic authentication.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates API key authentication sent as a header.
    #[must_use]
    pub fn api_key(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ApiKey {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns true if authentication is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !matches!(self, Self::None)
    }
}
