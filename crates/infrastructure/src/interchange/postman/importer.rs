//! Postman importer
//!
//! Walks a v2.x item tree (or a v1 flat request list) into a collection.
//! Requests are staged in discovery order; nothing is persisted here.

use std::collections::BTreeMap;

use courier_domain::{Collection, Folder, HttpMethod, Id, Request, RequestBody};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::types::{
    LegacyCollection, LegacyParam, LegacyRequest, PostmanBody, PostmanCollection,
    PostmanDescription, PostmanItem, PostmanKeyValue, PostmanRequestSpec,
};
use crate::config::ImportConfig;
use crate::interchange::{
    BodyHint, DetectedFormat, ImportedTree, InterchangeError, detect_format, sniff_body,
};

const DEFAULT_COLLECTION_NAME: &str = "Imported Collection";
const DEFAULT_FOLDER_NAME: &str = "Unnamed folder";
const DEFAULT_REQUEST_NAME: &str = "Unnamed request";

/// Direct children of one container, in document order.
#[derive(Default)]
struct Children {
    requests: Vec<Id>,
    folders: Vec<Folder>,
}

/// Postman collection importer.
#[derive(Debug, Clone, Default)]
pub struct PostmanImporter {
    config: ImportConfig,
}

impl PostmanImporter {
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

    /// Imports either Postman layout, chosen by signature.
    ///
    /// # Errors
    ///
    /// `UnrecognizedFormat` if the document is not Postman, otherwise
    /// `MalformedDocument` on any structural problem.
    pub fn import_document(&self, document: &Value) -> Result<ImportedTree, InterchangeError> {
        match detect_format(document) {
            DetectedFormat::PostmanModern => {
                let collection =
                    PostmanCollection::deserialize(document).map_err(InterchangeError::malformed)?;
                self.import_collection(&collection)
            }
            DetectedFormat::PostmanLegacy => {
                let collection =
                    LegacyCollection::deserialize(document).map_err(InterchangeError::malformed)?;
                Self::import_legacy(&collection)
            }
            DetectedFormat::Insomnia | DetectedFormat::Unknown => {
                Err(InterchangeError::UnrecognizedFormat)
            }
        }
    }

    /// Imports a v2.x collection.
    ///
    /// # Errors
    ///
    /// `MalformedDocument` if folders nest deeper than the configured limit
    /// or a request uses an unsupported method.
    pub fn import_collection(
        &self,
        document: &PostmanCollection,
    ) -> Result<ImportedTree, InterchangeError> {
        let name = document
            .info
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string());
        let description = document
            .description
            .as_ref()
            .or(document.info.description.as_ref())
            .map(describe)
            .unwrap_or_default();

        let mut requests = Vec::new();
        let children = self.walk_items(&document.item, 0, &mut requests)?;

        let mut collection = Collection::new(name).with_description(description);
        for id in children.requests {
            collection.add_request(id);
        }
        for folder in children.folders {
            collection.add_folder(folder);
        }

        Ok(ImportedTree {
            collection,
            requests,
        })
    }

    /// Imports a v1 collection: every request named in `order`, in that
    /// order, directly under the collection. Ids without an entry are skipped.
    ///
    /// # Errors
    ///
    /// `MalformedDocument` if a request uses an unsupported method.
    pub fn import_legacy(document: &LegacyCollection) -> Result<ImportedTree, InterchangeError> {
        let name = document
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string());
        let description = document.description.as_ref().map(describe).unwrap_or_default();
        let mut collection = Collection::new(name).with_description(description);

        let mut requests = Vec::new();
        for id in &document.order {
            let Some(entry) = document.requests.iter().find(|r| &r.id == id) else {
                debug!(id = %id, "legacy order entry has no matching request");
                continue;
            };
            let request = map_legacy_request(entry)?;
            collection.add_request(request.id.clone());
            requests.push(request);
        }

        Ok(ImportedTree {
            collection,
            requests,
        })
    }

    fn walk_items(
        &self,
        items: &[PostmanItem],
        depth: usize,
        requests: &mut Vec<Request>,
    ) -> Result<Children, InterchangeError> {
        let mut children = Children::default();

        for item in items {
            if let Some(nested) = &item.item {
                if depth >= self.config.max_depth {
                    return Err(InterchangeError::MalformedDocument(format!(
                        "folder nesting exceeds maximum depth of {}",
                        self.config.max_depth
                    )));
                }
                let name = item.name.as_deref().unwrap_or(DEFAULT_FOLDER_NAME);
                let mut folder = Folder::new(name)
                    .with_description(item.description.as_ref().map(describe).unwrap_or_default());

                let inner = self.walk_items(nested, depth + 1, requests)?;
                for id in inner.requests {
                    folder.add_request(id);
                }
                for subfolder in inner.folders {
                    folder.add_subfolder(subfolder);
                }
                children.folders.push(folder);
            } else if let Some(spec) = &item.request {
                let request = map_request(item, spec)?;
                children.requests.push(request.id.clone());
                requests.push(request);
            } else {
                debug!(name = ?item.name, "item is neither folder nor request, skipped");
            }
        }

        Ok(children)
    }
}

fn describe(description: &PostmanDescription) -> String {
    description.text().to_string()
}

fn enabled_map(entries: &[PostmanKeyValue]) -> BTreeMap<String, String> {
    entries.iter().filter_map(PostmanKeyValue::enabled_pair).collect()
}

fn map_request(item: &PostmanItem, spec: &PostmanRequestSpec) -> Result<Request, InterchangeError> {
    let name = item.name.as_deref().unwrap_or(DEFAULT_REQUEST_NAME);
    let item_description = item.description.as_ref().map(describe);

    let request = match spec {
        PostmanRequestSpec::Url(url) => Request::new(name, url.as_str()),
        PostmanRequestSpec::Detailed(detail) => {
            let description = detail.description.as_ref().map(describe);
            Request::new(name, detail.url.raw())
                .with_method(HttpMethod::from_document(detail.method.as_deref())?)
                .with_headers(enabled_map(&detail.header))
                .with_params(enabled_map(detail.url.query()))
                .with_body(detail.body.as_ref().map_or(RequestBody::None, map_body))
                .with_description(description.unwrap_or_default())
        }
    };

    Ok(match item_description {
        Some(text) if request.description.is_empty() => request.with_description(text),
        _ => request,
    })
}

fn map_body(body: &PostmanBody) -> RequestBody {
    match body.mode.as_deref() {
        Some("raw") => {
            let hint = if body
                .raw_language()
                .is_some_and(|language| language.eq_ignore_ascii_case("json"))
            {
                BodyHint::Json
            } else {
                BodyHint::Text
            };
            sniff_body(body.raw.as_deref().unwrap_or_default(), hint)
        }
        Some("urlencoded") => RequestBody::form(enabled_map(&body.urlencoded)),
        Some("formdata") => RequestBody::form(enabled_map(&body.formdata)),
        mode => {
            debug!(?mode, "body mode not imported");
            RequestBody::None
        }
    }
}

fn legacy_map(params: Option<&Vec<LegacyParam>>) -> BTreeMap<String, String> {
    params
        .into_iter()
        .flatten()
        .filter_map(LegacyParam::enabled_pair)
        .collect()
}

fn parse_header_lines(headers: &str) -> BTreeMap<String, String> {
    headers
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn map_legacy_request(entry: &LegacyRequest) -> Result<Request, InterchangeError> {
    let body = match entry.data_mode.as_deref() {
        Some("params" | "urlencoded") => RequestBody::form(legacy_map(entry.data.as_ref())),
        _ => entry
            .raw_mode_data
            .as_deref()
            .map_or(RequestBody::None, |raw| sniff_body(raw, BodyHint::Unspecified)),
    };

    Ok(Request::new(
        entry.name.as_deref().unwrap_or(DEFAULT_REQUEST_NAME),
        entry.url.clone().unwrap_or_default(),
    )
    .with_method(HttpMethod::from_document(entry.method.as_deref())?)
    .with_headers(parse_header_lines(entry.headers.as_deref().unwrap_or_default()))
    .with_params(legacy_map(entry.query_params.as_ref()))
    .with_body(body)
    .with_description(entry.description.as_ref().map(describe).unwrap_or_default()))
}
