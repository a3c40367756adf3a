//! Normalized response type
//!
//! A `Response` is the uniform outcome of one dispatch. Successful calls,
//! HTTP error statuses, transport failures and request-construction failures
//! all produce one; only the fields differ.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::DispatchErrorKind;

/// Why a dispatch did not complete normally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchError {
    /// Failure category.
    pub kind: DispatchErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl DispatchError {
    /// Creates a new dispatch error.
    #[must_use]
    pub fn new(kind: DispatchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The outcome of dispatching a request. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code, or 0 when no response was received.
    pub status: u16,
    /// Reason phrase, or the failure title when no response was received.
    pub status_text: String,
    /// Response headers, lower-cased names.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Decoded body: parsed JSON when the body is JSON, text otherwise.
    #[serde(default)]
    pub data: Value,
    /// Elapsed milliseconds.
    pub time: u64,
    /// Byte length of `data` serialized as JSON.
    pub size: usize,
    /// Set when the dispatch failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<DispatchError>,
}

impl Response {
    /// Creates a response from a received status line, headers and body.
    #[must_use]
    pub fn received(
        status: u16,
        status_text: impl Into<String>,
        headers: BTreeMap<String, String>,
        body: &[u8],
        time: u64,
    ) -> Self {
        let data = decode_data(body);
        let size = serialized_size(&data);
        Self {
            status,
            status_text: status_text.into(),
            headers,
            data,
            time,
            size,
            error: None,
        }
    }

    /// Creates a response for a dispatch that never received a response.
    ///
    /// `data` carries the error message so there is always something to render.
    #[must_use]
    pub fn failed(error: DispatchError, time: u64) -> Self {
        Self {
            status: 0,
            status_text: error.kind.title().to_string(),
            headers: BTreeMap::new(),
            data: Value::String(error.message.clone()),
            time,
            size: 0,
            error: Some(error),
        }
    }

    /// Creates a response for a dispatch that received a status line and
    /// headers but failed before the body was read.
    #[must_use]
    pub fn partial(
        status: u16,
        status_text: impl Into<String>,
        headers: BTreeMap<String, String>,
        error: DispatchError,
        time: u64,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers,
            data: Value::String(error.message.clone()),
            time,
            size: 0,
            error: Some(error),
        }
    }

    /// Returns true if a response was received from the server at all.
    #[must_use]
    pub const fn has_status(&self) -> bool {
        self.status != 0
    }

    /// Returns true if the dispatch failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

/// Decodes a response body: JSON when it parses, lossy UTF-8 text otherwise.
#[must_use]
pub fn decode_data(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// Returns the byte length of `data` serialized as JSON.
#[must_use]
pub fn serialized_size(data: &Value) -> usize {
    serde_json::to_vec(data).map_or(0, |bytes| bytes.len())
}
