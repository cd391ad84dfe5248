//! Insomnia importer
//!
//! Folders are created in one pass and assembled into a tree in a second,
//! bottom-up, so resources may appear in any order. A folder whose parent
//! is unknown, or that sits on a parent cycle, ends up at the collection
//! root; nothing is dropped.

use std::collections::{BTreeMap, HashMap};

use courier_domain::{Collection, Folder, HttpMethod, Request, RequestBody};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::types::{
    InsomniaBody, InsomniaDocument, InsomniaPair, InsomniaRequest, InsomniaRequestGroup,
    InsomniaResource, InsomniaWorkspace, KNOWN_RESOURCE_TYPES,
};
use crate::config::ImportConfig;
use crate::interchange::{
    BodyHint, DetectedFormat, ImportedTree, InterchangeError, detect_format, sniff_body,
};

const NO_WORKSPACE_NAME: &str = "Insomnia Collection";
const UNNAMED_WORKSPACE_NAME: &str = "Imported Collection";
const DEFAULT_FOLDER_NAME: &str = "Unnamed folder";
const DEFAULT_REQUEST_NAME: &str = "Unnamed request";

/// Resources of an export, split by kind, in document order.
#[derive(Default)]
struct Resources {
    workspace: Option<InsomniaWorkspace>,
    groups: Vec<InsomniaRequestGroup>,
    requests: Vec<InsomniaRequest>,
}

impl Resources {
    fn split(document: &InsomniaDocument) -> Result<Self, InterchangeError> {
        let mut resources = Self::default();
        for value in &document.resources {
            let kind = value.get("_type").and_then(Value::as_str);
            if !kind.is_some_and(|kind| KNOWN_RESOURCE_TYPES.contains(&kind)) {
                debug!(kind = ?kind, "resource skipped");
                continue;
            }
            match InsomniaResource::deserialize(value).map_err(InterchangeError::malformed)? {
                InsomniaResource::Workspace(workspace) => {
                    if resources.workspace.is_none() {
                        resources.workspace = Some(workspace);
                    }
                }
                InsomniaResource::RequestGroup(group) => resources.groups.push(group),
                InsomniaResource::Request(request) => resources.requests.push(request),
            }
        }
        Ok(resources)
    }
}

/// Folders keyed by their document id, waiting to be assembled.
struct FolderForest {
    folders: HashMap<String, Folder>,
    children: HashMap<String, Vec<String>>,
    max_depth: usize,
}

impl FolderForest {
    /// Removes the folder `id` and its whole subtree from the forest.
    fn take(&mut self, id: &str, depth: usize) -> Result<Option<Folder>, InterchangeError> {
        if depth >= self.max_depth {
            return Err(InterchangeError::MalformedDocument(format!(
                "folder nesting exceeds maximum depth of {}",
                self.max_depth
            )));
        }
        let Some(mut folder) = self.folders.remove(id) else {
            return Ok(None);
        };
        for child in self.children.remove(id).unwrap_or_default() {
            if let Some(subfolder) = self.take(&child, depth + 1)? {
                folder.add_subfolder(subfolder);
            }
        }
        Ok(Some(folder))
    }
}

/// Insomnia export importer.
#[derive(Debug, Clone, Default)]
pub struct InsomniaImporter {
    config: ImportConfig,
}

impl InsomniaImporter {
    /// Creates an importer with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an importer with custom limits.
    #[must_use]
    pub const fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Imports an Insomnia export.
    ///
    /// # Errors
    ///
    /// `UnrecognizedFormat` if the document is not an Insomnia export,
    /// otherwise `MalformedDocument` on any structural problem.
    pub fn import_document(&self, document: &Value) -> Result<ImportedTree, InterchangeError> {
        if detect_format(document) != DetectedFormat::Insomnia {
            return Err(InterchangeError::UnrecognizedFormat);
        }
        let document =
            InsomniaDocument::deserialize(document).map_err(InterchangeError::malformed)?;
        self.import_export(&document)
    }

    /// Imports the resources of a parsed export.
    ///
    /// # Errors
    ///
    /// `MalformedDocument` if a known resource has the wrong shape, folders
    /// nest deeper than the configured limit, or a request uses an
    /// unsupported method.
    pub fn import_export(
        &self,
        document: &InsomniaDocument,
    ) -> Result<ImportedTree, InterchangeError> {
        let resources = Resources::split(document)?;

        let (name, description, workspace_id) = match &resources.workspace {
            Some(workspace) => (
                workspace
                    .name
                    .clone()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| UNNAMED_WORKSPACE_NAME.to_string()),
                workspace.description.clone().unwrap_or_default(),
                Some(workspace.id.as_str()),
            ),
            None => (NO_WORKSPACE_NAME.to_string(), String::new(), None),
        };
        let mut collection = Collection::new(name).with_description(description);

        let mut folders = HashMap::with_capacity(resources.groups.len());
        let mut order = Vec::with_capacity(resources.groups.len());
        for group in &resources.groups {
            if folders.contains_key(&group.id) {
                debug!(id = %group.id, "duplicate folder id skipped");
                continue;
            }
            let folder = Folder::new(group.name.as_deref().unwrap_or(DEFAULT_FOLDER_NAME))
                .with_description(group.description.clone().unwrap_or_default());
            folders.insert(group.id.clone(), folder);
            order.push(group);
        }

        let mut requests = Vec::with_capacity(resources.requests.len());
        for resource in &resources.requests {
            let request = map_request(resource)?;
            match resource.parent_id.as_ref().and_then(|id| folders.get_mut(id)) {
                Some(folder) => folder.add_request(request.id.clone()),
                None => collection.add_request(request.id.clone()),
            }
            requests.push(request);
        }

        let mut roots = Vec::new();
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for group in &order {
            match group.parent_id.as_deref() {
                Some(parent) if Some(parent) != workspace_id && folders.contains_key(parent) => {
                    children
                        .entry(parent.to_string())
                        .or_default()
                        .push(group.id.clone());
                }
                _ => roots.push(group.id.clone()),
            }
        }

        let mut forest = FolderForest {
            folders,
            children,
            max_depth: self.config.max_depth,
        };
        for id in &roots {
            if let Some(folder) = forest.take(id, 0)? {
                collection.add_folder(folder);
            }
        }
        // Whatever is left sits on a parent cycle.
        for group in &order {
            if let Some(folder) = forest.take(&group.id, 0)? {
                debug!(id = %group.id, "folder on a parent cycle attached to the collection");
                collection.add_folder(folder);
            }
        }

        Ok(ImportedTree {
            collection,
            requests,
        })
    }
}

fn enabled_map(entries: &[InsomniaPair]) -> BTreeMap<String, String> {
    entries.iter().filter_map(InsomniaPair::enabled_pair).collect()
}

fn map_request(resource: &InsomniaRequest) -> Result<Request, InterchangeError> {
    let method = HttpMethod::from_document(resource.method.as_deref())?;
    let body = resource.body.as_ref().map_or(RequestBody::None, map_body);

    Ok(Request::new(
        resource.name.as_deref().unwrap_or(DEFAULT_REQUEST_NAME),
        resource.url.clone().unwrap_or_default(),
    )
    .with_method(method)
    .with_headers(enabled_map(&resource.headers))
    .with_params(enabled_map(&resource.parameters))
    .with_body(body)
    .with_description(resource.description.clone().unwrap_or_default()))
}

fn map_body(body: &InsomniaBody) -> RequestBody {
    let text = body.text.as_deref().unwrap_or_default();
    match BodyHint::from_mime(body.mime_type.as_deref()) {
        BodyHint::Json => sniff_body(text, BodyHint::Json),
        _ if !body.params.is_empty() => RequestBody::form(enabled_map(&body.params)),
        _ => sniff_body(text, BodyHint::Text),
    }
}
