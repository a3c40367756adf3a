//! Tab dispatch state and dispatch failure categories.
//!
//! A tab moves `Idle -> Sending -> Idle`; whether the last outcome succeeded
//! is read off the response it left behind, not off the state.

use serde::{Deserialize, Serialize};

/// Where a tab is in its dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TabState {
    /// Ready to send. Holds the last response, if any, on the tab.
    #[default]
    Idle,

    /// A dispatch is in flight.
    Sending {
        /// When the dispatch started, for elapsed-time display.
        /// Not persisted: `Instant` has no serialized form.
        #[serde(skip)]
        started_at: Option<std::time::Instant>,
    },
}

impl TabState {
    /// Creates a Sending state stamped with the current instant.
    #[must_use]
    pub fn sending() -> Self {
        Self::Sending {
            started_at: Some(std::time::Instant::now()),
        }
    }

    /// Returns true if a dispatch is in flight.
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        matches!(self, Self::Sending { .. })
    }

    /// Returns the elapsed time if sending.
    #[must_use]
    pub fn elapsed(&self) -> Option<std::time::Duration> {
        match self {
            Self::Sending {
                started_at: Some(t),
            } => Some(t.elapsed()),
            _ => None,
        }
    }
}

/// Categories of dispatch failures for user-friendly display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchErrorKind {
    /// The URL could not be parsed by the transport.
    InvalidUrl,

    /// The body could not be built, e.g. malformed JSON.
    InvalidBody,

    /// DNS resolution failed.
    DnsError,

    /// Could not establish a connection.
    ConnectionFailed,

    /// The server refused the connection.
    ConnectionRefused,

    /// The fixed timeout elapsed.
    Timeout,

    /// TLS handshake or certificate failure.
    TlsError,

    /// The redirect limit was exceeded.
    TooManyRedirects,

    /// Anything else.
    Unknown,
}

impl DispatchErrorKind {
    /// Returns true for failures raised while building the request, before
    /// anything reached the network.
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        matches!(self, Self::InvalidBody)
    }

    /// Returns user-facing suggestions for this failure.
    #[must_use]
    pub const fn suggestions(&self) -> &[&'static str] {
        match self {
            Self::InvalidUrl => &[
                "Check that the URL starts with http:// or https://",
                "Look for unresolved {{variables}} in the URL",
            ],
            Self::InvalidBody => &[
                "Check that the JSON syntax is valid",
                "Look for unresolved {{variables}} inside the body",
            ],
            Self::DnsError => &[
                "Check if the hostname is correct",
                "Verify your internet connection",
            ],
            Self::ConnectionFailed | Self::ConnectionRefused => &[
                "Check if the server is running",
                "Verify the port number is correct",
            ],
            Self::Timeout => &[
                "The server may be slow or overloaded",
                "Check your network connection",
            ],
            Self::TlsError => &[
                "The server's certificate may be invalid or expired",
                "Verify the hostname matches the certificate",
            ],
            Self::TooManyRedirects => &[
                "The server may have a redirect loop",
                "Try the final URL directly",
            ],
            Self::Unknown => &["Check the error message for details"],
        }
    }

    /// Returns a short title, also used as the status text of failed responses.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::InvalidBody => "Invalid Request Body",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionFailed => "Connection Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::Timeout => "Request Timeout",
            Self::TlsError => "SSL/TLS Error",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::Unknown => "Network Error",
        }
    }
}
