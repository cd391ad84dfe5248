//! Import and export entry points.
//!
//! [`CollectionInterchange`] owns the I/O around the pure walkers: reading
//! and size-checking the source file, persisting an imported tree, loading
//! the requests a collection references before an export, and writing the
//! exported document. The public `import`/`export` methods never fail; they
//! fold every error into an outcome carrying a message.

use std::path::Path;

use courier_application::ports::{FileSystem, Storage};
use courier_domain::Collection;
use serde::Serialize;
use serde_json::Value;

use super::insomnia::{InsomniaExport, InsomniaExporter, InsomniaImporter};
use super::postman::{PostmanCollection, PostmanExporter, PostmanImporter};
use super::{
    DetectedFormat, ExportOutcome, ImportOutcome, ImportedTree, InterchangeError,
    InterchangeFormat, RequestIndex, detect_format,
};
use crate::config::ImportConfig;
use crate::serialization::to_json_stable_bytes;

/// A document ready to be written, in either format.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExportDocument {
    /// Postman collection v2.1.
    Postman(PostmanCollection),
    /// Insomnia export v4.
    Insomnia(InsomniaExport),
}

/// Imports collections into storage and exports them back out.
#[derive(Debug, Clone)]
pub struct CollectionInterchange<S, F> {
    storage: S,
    fs: F,
    config: ImportConfig,
}

impl<S: Storage, F: FileSystem> CollectionInterchange<S, F> {
    /// Creates a service with default import limits.
    pub fn new(storage: S, fs: F) -> Self {
        Self {
            storage,
            fs,
            config: ImportConfig::default(),
        }
    }

    /// Replaces the import limits.
    #[must_use]
    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// The storage records are persisted to and loaded from.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Imports the collection file at `path`.
    ///
    /// On success every discovered request and then the collection have been
    /// saved. On failure nothing has been saved.
    pub async fn import(&self, path: &Path) -> ImportOutcome {
        match self.try_import(path).await {
            Ok(collection) => ImportOutcome::imported(collection),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "import failed");
                ImportOutcome::failed(&error)
            }
        }
    }

    /// Imports the collection file at `path`, returning the saved collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or exceeds the size
    /// limit, is not JSON, has no recognized format, fails to walk, or
    /// cannot be persisted.
    pub async fn try_import(&self, path: &Path) -> Result<Collection, InterchangeError> {
        let size = self.fs.file_size(path).await?;
        if size > self.config.max_file_size {
            return Err(InterchangeError::FileTooLarge {
                size,
                max: self.config.max_file_size,
            });
        }

        let bytes = self.fs.read_file(path).await?;
        let document: Value =
            serde_json::from_slice(&bytes).map_err(InterchangeError::malformed)?;
        let tree = self.import_document(&document)?;
        self.persist(tree).await
    }

    /// Walks a parsed document with the importer its signature selects.
    ///
    /// # Errors
    ///
    /// `UnrecognizedFormat` for an unknown signature, otherwise whatever the
    /// selected importer reports.
    pub fn import_document(&self, document: &Value) -> Result<ImportedTree, InterchangeError> {
        let format = detect_format(document);
        tracing::debug!(?format, "detected document format");
        match format {
            DetectedFormat::PostmanModern | DetectedFormat::PostmanLegacy => {
                PostmanImporter::with_config(self.config.clone()).import_document(document)
            }
            DetectedFormat::Insomnia => {
                InsomniaImporter::with_config(self.config.clone()).import_document(document)
            }
            DetectedFormat::Unknown => Err(InterchangeError::UnrecognizedFormat),
        }
    }

    /// Saves every request of `tree` in discovery order, then the collection.
    ///
    /// # Errors
    ///
    /// Returns the first storage failure.
    pub async fn persist(&self, tree: ImportedTree) -> Result<Collection, InterchangeError> {
        for request in &tree.requests {
            self.storage.save_request(request).await?;
        }
        self.storage.save_collection(&tree.collection).await?;

        tracing::info!(
            collection = %tree.collection.id,
            name = %tree.collection.name,
            requests = tree.requests.len(),
            folders = tree.collection.folder_count(),
            "collection imported"
        );
        Ok(tree.collection)
    }

    /// Exports `collection` to `path`. `format` is a format name as accepted
    /// by [`InterchangeFormat`]'s `FromStr`.
    pub async fn export(
        &self,
        collection: &Collection,
        path: &Path,
        format: &str,
    ) -> ExportOutcome {
        let result = match format.parse::<InterchangeFormat>() {
            Ok(format) => self.try_export(collection, path, format).await,
            Err(error) => Err(error),
        };
        match result {
            Ok(()) => ExportOutcome::exported(collection, path),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "export failed");
                ExportOutcome::failed(&error)
            }
        }
    }

    /// Exports the stored collection `id` to `path`.
    pub async fn export_collection_id(&self, id: &str, path: &Path, format: &str) -> ExportOutcome {
        match self.storage.get_collection(id).await {
            Ok(Some(collection)) => self.export(&collection, path, format).await,
            Ok(None) => {
                ExportOutcome::failed(&InterchangeError::CollectionNotFound(id.to_string()))
            }
            Err(error) => ExportOutcome::failed(&InterchangeError::from(error)),
        }
    }

    /// Writes `collection` to `path` in `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if loading requests, encoding, or writing fails.
    pub async fn try_export(
        &self,
        collection: &Collection,
        path: &Path,
        format: InterchangeFormat,
    ) -> Result<(), InterchangeError> {
        let document = self.export_document(collection, format).await?;
        let bytes = to_json_stable_bytes(&document)?;
        self.fs.write_file(path, &bytes).await?;

        tracing::info!(
            collection = %collection.id,
            %format,
            path = %path.display(),
            "collection exported"
        );
        Ok(())
    }

    /// Builds the export document for `collection` from the requests
    /// currently in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails or a body cannot be encoded.
    pub async fn export_document(
        &self,
        collection: &Collection,
        format: InterchangeFormat,
    ) -> Result<ExportDocument, InterchangeError> {
        let requests = self.load_requests(collection).await?;
        Ok(match format {
            InterchangeFormat::Postman => {
                ExportDocument::Postman(PostmanExporter::export(collection, &requests)?)
            }
            InterchangeFormat::Insomnia => {
                ExportDocument::Insomnia(InsomniaExporter::export(collection, &requests)?)
            }
        })
    }

    async fn load_requests(
        &self,
        collection: &Collection,
    ) -> Result<RequestIndex, InterchangeError> {
        let mut requests = RequestIndex::new();
        for id in collection.request_ids() {
            if requests.contains_key(&id) {
                continue;
            }
            match self.storage.get_request(&id).await? {
                Some(request) => {
                    requests.insert(id, request);
                }
                None => tracing::debug!(%id, "referenced request not in storage"),
            }
        }
        Ok(requests)
    }
}
