//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, the Postman and Insomnia
//! interchange engine and the runtime configuration.

pub mod config;
pub mod interchange;
pub mod persistence;
pub mod serialization;

pub use config::{AppConfig, ConfigError, ImportConfig};
pub use interchange::{
    CollectionInterchange, DetectedFormat, ExportDocument, ExportOutcome, ImportOutcome,
    InterchangeError, InterchangeFormat, detect_format,
};
pub use persistence::{FileStorage, InMemoryStorage, TokioFileSystem};
pub use serialization::{
    SerializationError, from_json, from_json_bytes, to_json_compact, to_json_stable,
    to_json_stable_bytes,
};
