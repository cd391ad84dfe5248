//! File-backed storage adapter.
//!
//! Every record is one JSON document:
//! ```text
//! data_dir/
//!   collections/<id>.json
//!   requests/<id>.json
//!   environments/<id>.json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use courier_application::ports::{FileSystem, FileSystemError, Storage, StorageError};
use courier_domain::{Collection, Environment, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const EXTENSION: &str = "json";

#[derive(Debug, Clone, Copy)]
enum RecordKind {
    Collection,
    Request,
    Environment,
}

impl RecordKind {
    const fn dir_name(self) -> &'static str {
        match self {
            Self::Collection => "collections",
            Self::Request => "requests",
            Self::Environment => "environments",
        }
    }
}

/// Storage adapter writing one JSON file per record under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage<F> {
    root: PathBuf,
    fs: F,
}

impl<F: FileSystem> FileStorage<F> {
    /// Creates a storage rooted at `root`. Directories are created lazily.
    pub fn new(root: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, kind: RecordKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    fn record_path(&self, kind: RecordKind, id: &str) -> Result<PathBuf, StorageError> {
        let usable = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\', '\0']);
        if !usable {
            return Err(StorageError::InvalidId(id.to_string()));
        }
        Ok(self.kind_dir(kind).join(format!("{id}.{EXTENSION}")))
    }

    async fn save_record<T: Serialize + Sync>(
        &self,
        kind: RecordKind,
        id: &str,
        record: &T,
    ) -> Result<(), StorageError> {
        let path = self.record_path(kind, id)?;
        let bytes =
            to_json_stable_bytes(record).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.fs.write_file(&path, &bytes).await?;
        debug!(kind = kind.dir_name(), id, "record saved");
        Ok(())
    }

    async fn load_path<T: DeserializeOwned>(
        &self,
        path: &Path,
        id: &str,
    ) -> Result<Option<T>, StorageError> {
        let bytes = match self.fs.read_file(path).await {
            Ok(bytes) => bytes,
            Err(FileSystemError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        from_json_bytes(&bytes)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }

    async fn load_record<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
        id: &str,
    ) -> Result<Option<T>, StorageError> {
        match self.record_path(kind, id) {
            Ok(path) => self.load_path(&path, id).await,
            // An id that could never have been saved is simply absent.
            Err(StorageError::InvalidId(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn load_all<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
    ) -> Result<Vec<T>, StorageError> {
        let dir = self.kind_dir(kind);
        let entries = match self.fs.read_dir(&dir).await {
            Ok(entries) => entries,
            Err(FileSystemError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for entry in entries {
            if entry.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }
            let id = entry
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            if let Some(record) = self.load_path(&entry, &id).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn delete_record(&self, kind: RecordKind, id: &str) -> Result<bool, StorageError> {
        let Ok(path) = self.record_path(kind, id) else {
            return Ok(false);
        };
        match self.fs.remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(FileSystemError::NotFound(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<F: FileSystem> Storage for FileStorage<F> {
    async fn save_request(&self, request: &Request) -> Result<(), StorageError> {
        self.save_record(RecordKind::Request, &request.id, request).await
    }

    async fn get_request(&self, id: &str) -> Result<Option<Request>, StorageError> {
        self.load_record(RecordKind::Request, id).await
    }

    async fn get_all_requests(&self) -> Result<Vec<Request>, StorageError> {
        self.load_all(RecordKind::Request).await
    }

    async fn delete_request(&self, id: &str) -> Result<bool, StorageError> {
        self.delete_record(RecordKind::Request, id).await
    }

    async fn save_collection(&self, collection: &Collection) -> Result<(), StorageError> {
        self.save_record(RecordKind::Collection, &collection.id, collection)
            .await
    }

    async fn get_collection(&self, id: &str) -> Result<Option<Collection>, StorageError> {
        self.load_record(RecordKind::Collection, id).await
    }

    async fn get_all_collections(&self) -> Result<Vec<Collection>, StorageError> {
        self.load_all(RecordKind::Collection).await
    }

    async fn delete_collection(&self, id: &str) -> Result<bool, StorageError> {
        self.delete_record(RecordKind::Collection, id).await
    }

    async fn save_environment(&self, environment: &Environment) -> Result<(), StorageError> {
        self.save_record(RecordKind::Environment, &environment.id, environment)
            .await
    }

    async fn get_environment(&self, id: &str) -> Result<Option<Environment>, StorageError> {
        self.load_record(RecordKind::Environment, id).await
    }

    async fn get_all_environments(&self) -> Result<Vec<Environment>, StorageError> {
        self.load_all(RecordKind::Environment).await
    }

    async fn delete_environment(&self, id: &str) -> Result<bool, StorageError> {
        self.delete_record(RecordKind::Environment, id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::persistence::TokioFileSystem;
    use courier_domain::{Folder, RequestBody};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    fn storage(root: &Path) -> FileStorage<TokioFileSystem> {
        FileStorage::new(root, TokioFileSystem::new())
    }

    #[tokio::test]
    async fn test_request_round_trip() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path());
        let request = Request::new("Create", "{{base}}/users")
            .with_header("Content-Type", "application/json")
            .with_body(RequestBody::json(json!({"name": "{{name}}"})));

        storage.save_request(&request).await.unwrap();

        let path = dir.path().join("requests").join(format!("{}.json", request.id));
        assert!(path.exists());
        assert_eq!(
            storage.get_request(&request.id).await.unwrap(),
            Some(request.clone())
        );
    }

    #[tokio::test]
    async fn test_collection_tree_round_trip() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path());
        let mut inner = Folder::new("inner");
        inner.add_request("r2");
        let mut outer = Folder::new("outer");
        outer.add_subfolder(inner);
        let mut collection = Collection::new("c");
        collection.add_request("r1");
        collection.add_folder(outer);

        storage.save_collection(&collection).await.unwrap();

        let loaded = storage.get_collection(&collection.id).await.unwrap().unwrap();
        assert_eq!(loaded, collection);
        assert_eq!(storage.get_all_collections().await.unwrap(), vec![collection]);
    }

    #[tokio::test]
    async fn test_missing_and_invalid_ids() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path());

        assert_eq!(storage.get_request("absent").await.unwrap(), None);
        assert_eq!(storage.get_request("../escape").await.unwrap(), None);
        assert!(storage.get_all_environments().await.unwrap().is_empty());
        assert!(!storage.delete_collection("absent").await.unwrap());

        let mut bad = Request::new("bad", "http://x");
        bad.id = "a/b".to_string();
        assert!(matches!(
            storage.save_request(&bad).await,
            Err(StorageError::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn test_save_replaces_and_delete_removes() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path());
        let mut env = Environment::new("dev").with_variable("host", "a");
        storage.save_environment(&env).await.unwrap();

        env.set_variable("host", "b");
        storage.save_environment(&env).await.unwrap();
        let all = storage.get_all_environments().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].variables.get("host").map(String::as_str), Some("b"));

        assert!(storage.delete_environment(&env.id).await.unwrap());
        assert!(storage.get_environment(&env.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path());
        let requests = dir.path().join("requests");
        std::fs::create_dir_all(&requests).unwrap();
        std::fs::write(requests.join("broken.json"), "{ not json").unwrap();
        std::fs::write(requests.join("notes.txt"), "ignored").unwrap();

        let err = storage.get_request("broken").await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref id, .. } if id == "broken"));
        assert!(storage.get_all_requests().await.is_err());
    }
}
