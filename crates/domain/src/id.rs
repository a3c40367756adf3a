//! ID generation utilities.

use uuid::Uuid;

/// Generates a new unique identifier as a string.
///
/// This is the id format for every workbench entity: requests, tabs,
/// collections and environments. Ids are UUID v7 so they sort by creation time.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}
