//! Folder type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{Id, generate_id};

/// A nested, named container of request references.
///
/// Folders are owned by exactly one parent (a collection or another folder)
/// and never point back at it. Anything that needs the parent walks down
/// from the collection root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique identifier.
    pub id: Id,

    /// Human-readable folder name.
    pub name: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Ids of the requests directly inside this folder.
    #[serde(default)]
    pub requests: Vec<Id>,

    /// Child folders.
    #[serde(default)]
    pub subfolders: Vec<Self>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Creates an empty folder with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            description: String::new(),
            requests: Vec::new(),
            subfolders: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the folder description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Refreshes the updated timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Adds a request reference. Adding an id twice is a no-op.
    pub fn add_request(&mut self, request_id: impl Into<Id>) {
        let request_id = request_id.into();
        if !self.requests.contains(&request_id) {
            self.requests.push(request_id);
            self.touch();
        }
    }

    /// Removes a direct request reference. Returns true if it was present.
    pub fn remove_request(&mut self, request_id: &str) -> bool {
        let before = self.requests.len();
        self.requests.retain(|id| id != request_id);
        let removed = self.requests.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Appends a child folder.
    pub fn add_subfolder(&mut self, folder: Self) {
        self.subfolders.push(folder);
        self.touch();
    }

    /// Removes a direct child folder by id, returning it.
    pub fn remove_subfolder(&mut self, folder_id: &str) -> Option<Self> {
        let index = self.subfolders.iter().position(|f| f.id == folder_id)?;
        self.touch();
        Some(self.subfolders.remove(index))
    }

    /// Finds this folder or a descendant by id.
    #[must_use]
    pub fn find(&self, folder_id: &str) -> Option<&Self> {
        if self.id == folder_id {
            return Some(self);
        }
        self.subfolders.iter().find_map(|f| f.find(folder_id))
    }

    /// Finds this folder or a descendant by id, mutably.
    pub fn find_mut(&mut self, folder_id: &str) -> Option<&mut Self> {
        if self.id == folder_id {
            return Some(self);
        }
        self.subfolders.iter_mut().find_map(|f| f.find_mut(folder_id))
    }

    /// Appends the ids of every request in this subtree, depth-first.
    pub fn collect_request_ids(&self, out: &mut Vec<Id>) {
        out.extend(self.requests.iter().cloned());
        for subfolder in &self.subfolders {
            subfolder.collect_request_ids(out);
        }
    }

    /// Removes a request reference from this folder and every descendant.
    pub fn detach_request(&mut self, request_id: &str) -> bool {
        let mut removed = self.remove_request(request_id);
        for subfolder in &mut self.subfolders {
            removed |= subfolder.detach_request(request_id);
        }
        removed
    }

    /// Number of folders in this subtree, this one included.
    #[must_use]
    pub fn count_folders(&self) -> usize {
        1 + self.subfolders.iter().map(Self::count_folders).sum::<usize>()
    }

    /// Pushes folder names onto `trail` on the way down to `folder_id`.
    ///
    /// Returns false, leaving `trail` as it was, when the id is not in this subtree.
    pub fn trail_to(&self, folder_id: &str, trail: &mut Vec<String>) -> bool {
        trail.push(self.name.clone());
        if self.id == folder_id || self.subfolders.iter().any(|f| f.trail_to(folder_id, trail)) {
            return true;
        }
        trail.pop();
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nested() -> Folder {
        let mut inner = Folder::new("Inner");
        inner.add_request("r-inner");
        let mut outer = Folder::new("Outer");
        outer.add_request("r-outer");
        outer.add_subfolder(inner);
        outer
    }

    #[test]
    fn test_add_request_is_idempotent() {
        let mut folder = Folder::new("Auth");
        folder.add_request("a");
        folder.add_request("a");
        assert_eq!(folder.requests, vec!["a".to_string()]);
    }

    #[test]
    fn test_remove_request() {
        let mut folder = Folder::new("Auth");
        folder.add_request("a");
        assert!(folder.remove_request("a"));
        assert!(!folder.remove_request("a"));
        assert!(folder.requests.is_empty());
    }

    #[test]
    fn test_find_descendant() {
        let folder = nested();
        let inner_id = folder.subfolders[0].id.clone();
        assert_eq!(folder.find(&inner_id).unwrap().name, "Inner");
        assert!(folder.find("missing").is_none());
    }

    #[test]
    fn test_find_mut_allows_parent_relative_mutation() {
        let mut folder = nested();
        let inner_id = folder.subfolders[0].id.clone();
        folder.find_mut(&inner_id).unwrap().add_request("added");
        assert_eq!(folder.subfolders[0].requests, vec!["r-inner", "added"]);
    }

    #[test]
    fn test_collect_and_detach() {
        let mut folder = nested();
        let mut ids = Vec::new();
        folder.collect_request_ids(&mut ids);
        assert_eq!(ids, vec!["r-outer", "r-inner"]);

        assert!(folder.detach_request("r-inner"));
        assert!(folder.subfolders[0].requests.is_empty());
        assert!(!folder.detach_request("r-inner"));
    }

    #[test]
    fn test_trail_to() {
        let folder = nested();
        let inner_id = folder.subfolders[0].id.clone();

        let mut trail = Vec::new();
        assert!(folder.trail_to(&inner_id, &mut trail));
        assert_eq!(trail, vec!["Outer", "Inner"]);

        let mut trail = Vec::new();
        assert!(!folder.trail_to("missing", &mut trail));
        assert!(trail.is_empty());
    }

    #[test]
    fn test_count_and_remove_subfolder() {
        let mut folder = nested();
        assert_eq!(folder.count_folders(), 2);
        let inner_id = folder.subfolders[0].id.clone();
        let removed = folder.remove_subfolder(&inner_id).unwrap();
        assert_eq!(removed.name, "Inner");
        assert_eq!(folder.count_folders(), 1);
    }
}
