//! HTTP Client port

use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use workbench_domain::{DispatchErrorKind, HttpMethod};

/// A fully resolved request, ready to go on the wire.
///
/// Every `{{variable}}` has already been substituted and auth has been
/// folded into the headers. Adapters only translate this to their library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL without the query parameters below.
    pub url: String,
    /// Query parameters appended by the transport.
    pub query: Vec<(String, String)>,
    /// Headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// Body payload.
    pub body: TransportBody,
    /// Overall request timeout.
    pub timeout: Duration,
}

impl TransportRequest {
    /// Returns the first header value with the given name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Body payload of a [`TransportRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransportBody {
    /// No body.
    #[default]
    None,
    /// A text payload sent verbatim.
    Text(String),
    /// A multipart/form-data payload.
    Multipart(Vec<MultipartField>),
}

impl TransportBody {
    /// Returns true if there is no body to send.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartField {
    /// Part name.
    pub name: String,
    /// Part content.
    pub value: MultipartValue,
}

/// Content of a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartValue {
    /// Plain text value.
    Text(String),
    /// File read from disk at send time.
    File(PathBuf),
}

/// The raw response as received by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase.
    pub status_text: String,
    /// Response headers. Repeated names are joined with `", "`.
    pub headers: BTreeMap<String, String>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

/// Errors reported by an [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The body could not be built.
    #[error("Invalid body: {0}")]
    InvalidBody(String),

    /// A multipart file could not be read.
    #[error("Failed to read file {path}: {message}")]
    File {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O message.
        message: String,
    },

    /// The host name could not be resolved.
    #[error("Could not resolve host {host}: {message}")]
    DnsError {
        /// The host being resolved.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The server refused the connection.
    #[error("Connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request exceeded its timeout.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// TLS negotiation failed.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// The redirect limit was hit.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: u32,
    },

    /// A status line and headers arrived but reading the body failed.
    #[error("{message}")]
    Incomplete {
        /// Received status code.
        status: u16,
        /// Received reason phrase.
        status_text: String,
        /// Received headers.
        headers: BTreeMap<String, String>,
        /// Why the body could not be read.
        message: String,
    },

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Maps this error onto the user-facing error category.
    #[must_use]
    pub const fn to_error_kind(&self) -> DispatchErrorKind {
        match self {
            Self::InvalidUrl(_) => DispatchErrorKind::InvalidUrl,
            Self::InvalidBody(_) | Self::File { .. } => DispatchErrorKind::InvalidBody,
            Self::DnsError { .. } => DispatchErrorKind::DnsError,
            Self::ConnectionRefused { .. } => DispatchErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => DispatchErrorKind::ConnectionFailed,
            Self::Timeout { .. } => DispatchErrorKind::Timeout,
            Self::TlsError(_) => DispatchErrorKind::TlsError,
            Self::TooManyRedirects { .. } => DispatchErrorKind::TooManyRedirects,
            Self::Incomplete { .. } | Self::Other(_) => DispatchErrorKind::Unknown,
        }
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
pub trait HttpClient: Send + Sync {
    /// Executes a resolved request and returns the raw response.
    ///
    /// Any status code counts as success; only transport failures are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other HTTP-related problems.
    fn execute(
        &self,
        request: &TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, HttpClientError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            HttpClientError::Timeout { timeout_ms: 30_000 }.to_error_kind(),
            DispatchErrorKind::Timeout
        );
        assert_eq!(
            HttpClientError::File {
                path: "/tmp/x".to_string(),
                message: "missing".to_string(),
            }
            .to_error_kind(),
            DispatchErrorKind::InvalidBody
        );
        assert_eq!(
            HttpClientError::Other("boom".to_string()).to_error_kind(),
            DispatchErrorKind::Unknown
        );
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = TransportRequest {
            method: HttpMethod::Get,
            url: "http://localhost".to_string(),
            query: Vec::new(),
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: TransportBody::None,
            timeout: Duration::from_secs(1),
        };
        assert_eq!(request.header("content-type"), Some("text/plain"));
        assert_eq!(request.header("accept"), None);
    }
}
