//! Postman collection interchange (v2.1 export, v2.x and v1 import).

mod exporter;
mod importer;
pub mod types;

pub use exporter::PostmanExporter;
pub use importer::PostmanImporter;
pub use types::{LegacyCollection, PostmanCollection, SCHEMA_V2_1};
