//! Workbench Domain - Core business types
//!
//! This crate defines the domain model of the API request workbench:
//! requests, responses, tabs, collections, environments and history.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod collection;
pub mod environment;
pub mod error;
pub mod history;
pub mod id;
pub mod request;
pub mod response;
pub mod state;
pub mod tab;

pub use auth::Auth;
pub use collection::{Collection, CollectionMetadata};
pub use environment::{DEFAULT_ENVIRONMENT_NAME, Environment, Variable};
pub use error::{DomainError, DomainResult};
pub use history::{HISTORY_LIMIT, RequestHistory};
pub use id::generate_id;
pub use request::{
    FormField, FormFieldKind, HttpMethod, KeyValue, KeyValueList, Request, RequestBody,
    RequestPatch,
};
pub use response::{DispatchError, Response};
pub use state::{DispatchErrorKind, TabState};
pub use tab::Tab;
