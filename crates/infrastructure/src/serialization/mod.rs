//! Deterministic JSON serialization for stored records and exported documents.
//!
//! - Object keys follow declaration order, or sorted order for `BTreeMap` fields
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 without BOM

mod json;

pub use json::*;
