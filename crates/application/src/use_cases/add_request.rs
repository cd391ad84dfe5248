//! Add request use case.

use courier_domain::{Id, Request};

use crate::ports::Storage;
use crate::{ApplicationError, ApplicationResult};

/// Input for adding a request to a collection.
#[derive(Debug, Clone)]
pub struct AddRequestInput {
    /// Collection receiving the request.
    pub collection_id: Id,
    /// Folder inside the collection; `None` means the collection itself.
    pub folder_id: Option<Id>,
    /// The request to store.
    pub request: Request,
}

/// Stores a request and references it from a collection or one of its folders.
pub struct AddRequest<S: Storage> {
    storage: S,
}

impl<S: Storage> AddRequest<S> {
    /// Creates a new `AddRequest` use case.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persists the request, then the updated collection.
    ///
    /// # Errors
    /// - `NotFound` if the collection does not exist
    /// - `Domain(FolderNotFound)` if the folder is not in the collection
    /// - `Storage` if a record cannot be written
    pub async fn execute(&self, input: AddRequestInput) -> ApplicationResult<Request> {
        let mut collection = self
            .storage
            .get_collection(&input.collection_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::NotFound(format!("collection {}", input.collection_id))
            })?;

        collection.attach_request(input.folder_id.as_deref(), input.request.id.clone())?;

        self.storage.save_request(&input.request).await?;
        self.storage.save_collection(&collection).await?;

        Ok(input.request)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockStorage;
    use courier_domain::{Collection, DomainError, Folder};

    #[tokio::test]
    async fn test_add_to_folder() {
        let storage = MockStorage::default();
        let mut collection = Collection::new("c");
        let folder = Folder::new("f");
        let folder_id = folder.id.clone();
        collection.add_folder(folder);
        storage.save_collection(&collection).await.unwrap();

        let use_case = AddRequest::new(storage);
        let request = use_case
            .execute(AddRequestInput {
                collection_id: collection.id.clone(),
                folder_id: Some(folder_id.clone()),
                request: Request::new("r", "http://x"),
            })
            .await
            .unwrap();

        let stored = use_case
            .storage
            .get_collection(&collection.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.find_folder(&folder_id).unwrap().requests.contains(&request.id));
        assert!(use_case.storage.get_request(&request.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unknown_folder_persists_nothing() {
        let storage = MockStorage::default();
        let collection = Collection::new("c");
        storage.save_collection(&collection).await.unwrap();

        let use_case = AddRequest::new(storage);
        let request = Request::new("r", "http://x");
        let err = use_case
            .execute(AddRequestInput {
                collection_id: collection.id.clone(),
                folder_id: Some("missing".to_string()),
                request: request.clone(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::FolderNotFound(_))
        ));
        assert!(use_case.storage.get_request(&request.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_collection() {
        let use_case = AddRequest::new(MockStorage::default());
        let err = use_case
            .execute(AddRequestInput {
                collection_id: "nope".to_string(),
                folder_id: None,
                request: Request::new("r", "http://x"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }
}
