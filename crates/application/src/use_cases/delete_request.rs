//! Delete request use case.

use courier_domain::Id;
use tracing::info;

use crate::ApplicationResult;
use crate::ports::Storage;

/// Output from deleting a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequestOutput {
    /// Collections that referenced the request and were rewritten.
    pub detached_from: Vec<Id>,
    /// Whether a stored request record was removed.
    pub deleted: bool,
}

/// Hard-deletes a request after removing every reference to it.
pub struct DeleteRequest<S: Storage> {
    storage: S,
}

impl<S: Storage> DeleteRequest<S> {
    /// Creates a new `DeleteRequest` use case.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Detaches `request_id` from every collection, then deletes the record.
    ///
    /// # Errors
    /// Returns an error if a collection cannot be read or rewritten, or the
    /// record cannot be removed.
    pub async fn execute(&self, request_id: &str) -> ApplicationResult<DeleteRequestOutput> {
        let mut detached_from = Vec::new();
        for mut collection in self.storage.get_all_collections().await? {
            if collection.detach_request(request_id) {
                self.storage.save_collection(&collection).await?;
                detached_from.push(collection.id);
            }
        }

        let deleted = self.storage.delete_request(request_id).await?;
        info!(request_id, collections = detached_from.len(), deleted, "request deleted");

        Ok(DeleteRequestOutput {
            detached_from,
            deleted,
        })
    }
}
