//! Storage port
//!
//! Defines the interface for persisting requests, collections and
//! environments. Every record is keyed by its id; saving an existing id
//! replaces the stored record.

use async_trait::async_trait;

use courier_domain::{Collection, Environment, Request};

use super::FileSystemError;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying file system failed.
    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),

    /// A stored record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The id cannot be used as a record key.
    #[error("Invalid record id: {0:?}")]
    InvalidId(String),

    /// A stored record exists but is unusable.
    #[error("Corrupt record {id}: {reason}")]
    Corrupt {
        /// Id of the record.
        id: String,
        /// What went wrong.
        reason: String,
    },
}

/// Persistence port for the three record kinds.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Saves (creates or replaces) a request.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    async fn save_request(&self, request: &Request) -> Result<(), StorageError>;

    /// Loads a request by id.
    ///
    /// # Errors
    /// Returns an error if the record exists but cannot be read.
    async fn get_request(&self, id: &str) -> Result<Option<Request>, StorageError>;

    /// Lists every stored request.
    ///
    /// # Errors
    /// Returns an error if the store cannot be enumerated.
    async fn get_all_requests(&self) -> Result<Vec<Request>, StorageError>;

    /// Deletes a request. Returns true if it existed.
    ///
    /// # Errors
    /// Returns an error if the record cannot be removed.
    async fn delete_request(&self, id: &str) -> Result<bool, StorageError>;

    /// Saves (creates or replaces) a collection.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    async fn save_collection(&self, collection: &Collection) -> Result<(), StorageError>;

    /// Loads a collection by id.
    ///
    /// # Errors
    /// Returns an error if the record exists but cannot be read.
    async fn get_collection(&self, id: &str) -> Result<Option<Collection>, StorageError>;

    /// Lists every stored collection.
    ///
    /// # Errors
    /// Returns an error if the store cannot be enumerated.
    async fn get_all_collections(&self) -> Result<Vec<Collection>, StorageError>;

    /// Deletes a collection record. Referenced requests are left alone.
    ///
    /// # Errors
    /// Returns an error if the record cannot be removed.
    async fn delete_collection(&self, id: &str) -> Result<bool, StorageError>;

    /// Saves (creates or replaces) an environment.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    async fn save_environment(&self, environment: &Environment) -> Result<(), StorageError>;

    /// Loads an environment by id.
    ///
    /// # Errors
    /// Returns an error if the record exists but cannot be read.
    async fn get_environment(&self, id: &str) -> Result<Option<Environment>, StorageError>;

    /// Lists every stored environment.
    ///
    /// # Errors
    /// Returns an error if the store cannot be enumerated.
    async fn get_all_environments(&self) -> Result<Vec<Environment>, StorageError>;

    /// Deletes an environment. Returns true if it existed.
    ///
    /// # Errors
    /// Returns an error if the record cannot be removed.
    async fn delete_environment(&self, id: &str) -> Result<bool, StorageError>;
}
