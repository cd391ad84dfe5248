//! Insomnia export interchange (format 4).

mod exporter;
mod importer;
pub mod types;

pub use exporter::InsomniaExporter;
pub use importer::InsomniaImporter;
pub use types::{InsomniaDocument, InsomniaExport};
