//! Collection domain types

mod spec;

pub use spec::{Collection, CollectionMetadata};
