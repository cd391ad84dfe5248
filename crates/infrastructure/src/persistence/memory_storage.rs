//! In-memory storage adapter for tests and embedding.

use std::collections::HashMap;

use async_trait::async_trait;
use courier_application::ports::{Storage, StorageError};
use courier_domain::{Collection, Environment, Request};
use tokio::sync::RwLock;

/// Keeps every record in process memory. Listings are ordered by id.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    requests: RwLock<HashMap<String, Request>>,
    collections: RwLock<HashMap<String, Collection>>,
    environments: RwLock<HashMap<String, Environment>>,
}

impl InMemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored requests.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Number of stored collections.
    pub async fn collection_count(&self) -> usize {
        self.collections.read().await.len()
    }
}

async fn sorted<T: Clone>(map: &RwLock<HashMap<String, T>>) -> Vec<T> {
    let guard = map.read().await;
    let mut entries: Vec<_> = guard.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter().map(|(_, v)| v.clone()).collect()
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_request(&self, request: &Request) -> Result<(), StorageError> {
        self.requests
            .write()
            .await
            .insert(request.id.clone(), request.clone());
        Ok(())
    }

    async fn get_request(&self, id: &str) -> Result<Option<Request>, StorageError> {
        Ok(self.requests.read().await.get(id).cloned())
    }

    async fn get_all_requests(&self) -> Result<Vec<Request>, StorageError> {
        Ok(sorted(&self.requests).await)
    }

    async fn delete_request(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.requests.write().await.remove(id).is_some())
    }

    async fn save_collection(&self, collection: &Collection) -> Result<(), StorageError> {
        self.collections
            .write()
            .await
            .insert(collection.id.clone(), collection.clone());
        Ok(())
    }

    async fn get_collection(&self, id: &str) -> Result<Option<Collection>, StorageError> {
        Ok(self.collections.read().await.get(id).cloned())
    }

    async fn get_all_collections(&self) -> Result<Vec<Collection>, StorageError> {
        Ok(sorted(&self.collections).await)
    }

    async fn delete_collection(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.collections.write().await.remove(id).is_some())
    }

    async fn save_environment(&self, environment: &Environment) -> Result<(), StorageError> {
        self.environments
            .write()
            .await
            .insert(environment.id.clone(), environment.clone());
        Ok(())
    }

    async fn get_environment(&self, id: &str) -> Result<Option<Environment>, StorageError> {
        Ok(self.environments.read().await.get(id).cloned())
    }

    async fn get_all_environments(&self) -> Result<Vec<Environment>, StorageError> {
        Ok(sorted(&self.environments).await)
    }

    async fn delete_environment(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.environments.write().await.remove(id).is_some())
    }
}
