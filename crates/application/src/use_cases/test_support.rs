//! In-process storage double shared by the use case tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use courier_domain::{Collection, Environment, Request};

use crate::ports::{Storage, StorageError};

#[derive(Default)]
pub struct MockStorage {
    requests: Mutex<HashMap<String, Request>>,
    collections: Mutex<HashMap<String, Collection>>,
    environments: Mutex<HashMap<String, Environment>>,
}

fn get<T: Clone>(map: &Mutex<HashMap<String, T>>, id: &str) -> Option<T> {
    map.lock().ok().and_then(|m| m.get(id).cloned())
}

fn put<T>(map: &Mutex<HashMap<String, T>>, id: &str, value: T) {
    if let Ok(mut m) = map.lock() {
        m.insert(id.to_string(), value);
    }
}

fn remove<T>(map: &Mutex<HashMap<String, T>>, id: &str) -> bool {
    map.lock().is_ok_and(|mut m| m.remove(id).is_some())
}

fn all<T: Clone>(map: &Mutex<HashMap<String, T>>) -> Vec<T> {
    map.lock()
        .map(|m| m.values().cloned().collect())
        .unwrap_or_default()
}

#[async_trait]
impl Storage for MockStorage {
    async fn save_request(&self, request: &Request) -> Result<(), StorageError> {
        put(&self.requests, &request.id, request.clone());
        Ok(())
    }

    async fn get_request(&self, id: &str) -> Result<Option<Request>, StorageError> {
        Ok(get(&self.requests, id))
    }

    async fn get_all_requests(&self) -> Result<Vec<Request>, StorageError> {
        Ok(all(&self.requests))
    }

    async fn delete_request(&self, id: &str) -> Result<bool, StorageError> {
        Ok(remove(&self.requests, id))
    }

    async fn save_collection(&self, collection: &Collection) -> Result<(), StorageError> {
        put(&self.collections, &collection.id, collection.clone());
        Ok(())
    }

    async fn get_collection(&self, id: &str) -> Result<Option<Collection>, StorageError> {
        Ok(get(&self.collections, id))
    }

    async fn get_all_collections(&self) -> Result<Vec<Collection>, StorageError> {
        Ok(all(&self.collections))
    }

    async fn delete_collection(&self, id: &str) -> Result<bool, StorageError> {
        Ok(remove(&self.collections, id))
    }

    async fn save_environment(&self, environment: &Environment) -> Result<(), StorageError> {
        put(&self.environments, &environment.id, environment.clone());
        Ok(())
    }

    async fn get_environment(&self, id: &str) -> Result<Option<Environment>, StorageError> {
        Ok(get(&self.environments, id))
    }

    async fn get_all_environments(&self) -> Result<Vec<Environment>, StorageError> {
        Ok(all(&self.environments))
    }

    async fn delete_environment(&self, id: &str) -> Result<bool, StorageError> {
        Ok(remove(&self.environments, id))
    }
}
