//! Collection tree types.
//!
//! A collection owns its folders outright (a tree, never a graph). Requests are
//! not embedded; containers hold request ids and the records live in storage.

mod folder;

pub use folder::Folder;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::{Id, generate_id};

/// Top-level named container of requests and folders; the unit of import/export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier.
    pub id: Id,

    /// Human-readable collection name.
    pub name: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Ids of the requests directly under the collection.
    #[serde(default)]
    pub requests: Vec<Id>,

    /// Top-level folders.
    #[serde(default)]
    pub folders: Vec<Folder>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    /// Creates an empty collection with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            description: String::new(),
            requests: Vec::new(),
            folders: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the collection description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Refreshes the updated timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Adds a collection-level request reference. Adding an id twice is a no-op.
    pub fn add_request(&mut self, request_id: impl Into<Id>) {
        let request_id = request_id.into();
        if !self.requests.contains(&request_id) {
            self.requests.push(request_id);
            self.touch();
        }
    }

    /// Removes a collection-level request reference. Returns true if it was present.
    pub fn remove_request(&mut self, request_id: &str) -> bool {
        let before = self.requests.len();
        self.requests.retain(|id| id != request_id);
        let removed = self.requests.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Adds a request reference under `folder_id`, or at collection level when `None`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::FolderNotFound` if the folder is not in the tree.
    pub fn attach_request(
        &mut self,
        folder_id: Option<&str>,
        request_id: impl Into<Id>,
    ) -> DomainResult<()> {
        match folder_id {
            None => self.add_request(request_id),
            Some(folder_id) => {
                self.find_folder_mut(folder_id)
                    .ok_or_else(|| DomainError::FolderNotFound(folder_id.to_string()))?
                    .add_request(request_id);
                self.touch();
            }
        }
        Ok(())
    }

    /// Appends a top-level folder.
    pub fn add_folder(&mut self, folder: Folder) {
        self.folders.push(folder);
        self.touch();
    }

    /// Removes a top-level folder by id, returning it.
    pub fn remove_folder(&mut self, folder_id: &str) -> Option<Folder> {
        let index = self.folders.iter().position(|f| f.id == folder_id)?;
        self.touch();
        Some(self.folders.remove(index))
    }

    /// Finds a folder anywhere in the tree.
    #[must_use]
    pub fn find_folder(&self, folder_id: &str) -> Option<&Folder> {
        self.folders.iter().find_map(|f| f.find(folder_id))
    }

    /// Finds a folder anywhere in the tree, mutably.
    pub fn find_folder_mut(&mut self, folder_id: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find_map(|f| f.find_mut(folder_id))
    }

    /// Folder names from the root down to `folder_id`, or `None` if absent.
    #[must_use]
    pub fn folder_path(&self, folder_id: &str) -> Option<Vec<String>> {
        let mut trail = Vec::new();
        let found = self
            .folders
            .iter()
            .any(|f| f.trail_to(folder_id, &mut trail));
        found.then_some(trail)
    }

    /// Every request id referenced in the tree: collection level first, then
    /// folders depth-first.
    #[must_use]
    pub fn request_ids(&self) -> Vec<Id> {
        let mut ids = self.requests.clone();
        for folder in &self.folders {
            folder.collect_request_ids(&mut ids);
        }
        ids
    }

    /// Returns true if the id is referenced anywhere in the tree.
    #[must_use]
    pub fn contains_request(&self, request_id: &str) -> bool {
        self.request_ids().iter().any(|id| id == request_id)
    }

    /// Removes a request reference from the collection and every folder.
    pub fn detach_request(&mut self, request_id: &str) -> bool {
        let mut removed = self.remove_request(request_id);
        for folder in &mut self.folders {
            removed |= folder.detach_request(request_id);
        }
        if removed {
            self.touch();
        }
        removed
    }

    /// Total number of folders in the tree.
    #[must_use]
    pub fn folder_count(&self) -> usize {
        self.folders.iter().map(Folder::count_folders).sum()
    }
}
