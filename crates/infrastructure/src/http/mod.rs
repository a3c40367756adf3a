//! HTTP infrastructure utilities.

mod body_builder;

pub use body_builder::build_multipart_form;
