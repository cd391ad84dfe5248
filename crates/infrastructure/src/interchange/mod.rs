//! Collection interchange with Postman and Insomnia.
//!
//! Import walks an external document into a [`Collection`] plus the
//! requests it references; export walks a collection (and its stored
//! requests) back out. The walkers are pure; [`CollectionInterchange`]
//! does the file and storage I/O around them.

mod content;
mod detect;
pub mod insomnia;
pub mod postman;
mod service;

pub use content::{BodyHint, sniff_body};
pub use detect::{DetectedFormat, detect_format};
pub use service::{CollectionInterchange, ExportDocument};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use courier_application::ports::{FileSystemError, StorageError};
use courier_domain::{Collection, DomainError, Id, Request};
use thiserror::Error;

use crate::serialization::SerializationError;

/// Interchange error type.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// The document matches neither supported signature.
    #[error("Unrecognized file format: expected a Postman or Insomnia collection")]
    UnrecognizedFormat,

    /// The document has a known signature but an unexpected structure.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The file is larger than the configured limit.
    #[error("File too large: {size} bytes exceeds maximum of {max} bytes")]
    FileTooLarge {
        /// Actual file size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        max: u64,
    },

    /// The export format name is not one we write.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The collection to export does not exist.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Reading or writing the interchange file failed.
    #[error("File error: {0}")]
    FileSystem(#[from] FileSystemError),

    /// Persisting or loading records failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Encoding the exported document failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

impl InterchangeError {
    pub(crate) fn malformed(error: impl fmt::Display) -> Self {
        Self::MalformedDocument(error.to_string())
    }
}

// A model rule broken while walking a document, such as an unknown method.
impl From<DomainError> for InterchangeError {
    fn from(error: DomainError) -> Self {
        Self::malformed(error)
    }
}

/// External format written by export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterchangeFormat {
    /// Postman collection v2.1.
    Postman,
    /// Insomnia export v4.
    Insomnia,
}

impl InterchangeFormat {
    /// Lowercase format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postman => "postman",
            Self::Insomnia => "insomnia",
        }
    }
}

impl fmt::Display for InterchangeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterchangeFormat {
    type Err = InterchangeError;

    /// Accepts `postman`/`a` and `insomnia`/`b`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postman" | "a" => Ok(Self::Postman),
            "insomnia" | "b" => Ok(Self::Insomnia),
            _ => Err(InterchangeError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Stored requests loaded ahead of an export, keyed by id.
pub type RequestIndex = HashMap<Id, Request>;

/// A collection tree built by an import walker, with the requests it
/// references in discovery order. Nothing in it is persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedTree {
    /// The assembled collection.
    pub collection: Collection,
    /// Every request the collection references.
    pub requests: Vec<Request>,
}

/// Result of an import at the public boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Whether the collection and its requests were persisted.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// The persisted collection, on success.
    pub collection: Option<Collection>,
}

impl ImportOutcome {
    pub(crate) fn imported(collection: Collection) -> Self {
        Self {
            success: true,
            message: format!("Collection '{}' imported successfully", collection.name),
            collection: Some(collection),
        }
    }

    pub(crate) fn failed(error: &InterchangeError) -> Self {
        Self {
            success: false,
            message: format!("Failed to import collection: {error}"),
            collection: None,
        }
    }
}

/// Result of an export at the public boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Whether the file was written.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
}

impl ExportOutcome {
    pub(crate) fn exported(collection: &Collection, path: &std::path::Path) -> Self {
        Self {
            success: true,
            message: format!(
                "Collection '{}' exported successfully to {}",
                collection.name,
                path.display()
            ),
        }
    }

    pub(crate) fn failed(error: &InterchangeError) -> Self {
        Self {
            success: false,
            message: format!("Failed to export collection: {error}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_names() {
        assert_eq!("Postman".parse::<InterchangeFormat>().unwrap(), InterchangeFormat::Postman);
        assert_eq!("A".parse::<InterchangeFormat>().unwrap(), InterchangeFormat::Postman);
        assert_eq!(" insomnia ".parse::<InterchangeFormat>().unwrap(), InterchangeFormat::Insomnia);
        assert_eq!("b".parse::<InterchangeFormat>().unwrap(), InterchangeFormat::Insomnia);
        assert!(matches!(
            "har".parse::<InterchangeFormat>(),
            Err(InterchangeError::UnsupportedFormat(name)) if name == "har"
        ));
        assert_eq!(InterchangeFormat::Insomnia.to_string(), "insomnia");
    }

    #[test]
    fn test_failure_message_carries_cause() {
        let outcome = ImportOutcome::failed(&InterchangeError::UnrecognizedFormat);
        assert!(!outcome.success);
        assert!(outcome.message.contains("Unrecognized file format"));
        assert!(outcome.collection.is_none());
    }
}
