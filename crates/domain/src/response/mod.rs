//! HTTP response domain types

mod spec;

pub use spec::{DispatchError, Response, decode_data, serialized_size};
