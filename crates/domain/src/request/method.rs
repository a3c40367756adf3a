//! Request methods offered in the method picker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Method a workbench request is sent with. Stored as its upper-case token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Default for a fresh tab.
    #[default]
    Get,
    /// Sends the request body.
    Post,
    /// Sends the request body.
    Put,
    /// Body setting is ignored.
    Delete,
    /// Sends the request body.
    Patch,
    /// Body setting is ignored.
    Head,
    /// Body setting is ignored.
    Options,
}

impl HttpMethod {
    /// Picker order.
    pub const ALL: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Head,
        Self::Options,
    ];

    /// True for POST, PUT and PATCH. Any other method goes out without a body
    /// whatever the tab's body editor holds.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Upper-case token as written on the request line.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Accepts any casing and surrounding whitespace, e.g. `" patch "`.
impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.token().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnsupportedMethod(s.to_string()))
    }
}
