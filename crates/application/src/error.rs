//! Application error types

use thiserror::Error;

/// Reasons a send is refused before anything goes on the wire.
///
/// Once a send starts it always yields a response; failures of the request
/// itself are carried inside that response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// There is no active tab to send.
    #[error("no active tab")]
    NoActiveTab,

    /// The tab does not exist.
    #[error("tab not found: {0}")]
    TabNotFound(String),

    /// The tab already has a request in flight.
    #[error("tab {0} is already sending")]
    AlreadySending(String),
}

/// Result type alias for send operations.
pub type SendResult<T> = Result<T, SendError>;
