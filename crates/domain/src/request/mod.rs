//! HTTP request domain types

mod body;
mod key_value;
mod method;
mod patch;
mod spec;

pub use body::{FormField, FormFieldKind, RequestBody};
pub use key_value::{KeyValue, KeyValueList};
pub use method::HttpMethod;
pub use patch::RequestPatch;
pub use spec::{DEFAULT_REQUEST_NAME, Request};
