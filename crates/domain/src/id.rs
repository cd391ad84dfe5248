//! ID generation utilities.

use uuid::Uuid;

/// Opaque identifier shared by every stored entity.
///
/// Kept as a plain string so ids coming from interchange documents
/// (which are not necessarily UUIDs) can be carried around unchanged.
pub type Id = String;

/// Generates a new time-ordered UUID (v7) as a string.
///
/// This is the standard ID format for all Courier entities.
#[must_use]
pub fn generate_id() -> Id {
    Uuid::now_v7().to_string()
}
