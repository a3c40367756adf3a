//! Stable JSON encoding for slot files.
//!
//! Slot files are written with two-space indentation and a trailing newline.
//! Object keys come out sorted, so rewriting an unchanged slot yields the
//! same bytes.

mod json;

pub use json::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
