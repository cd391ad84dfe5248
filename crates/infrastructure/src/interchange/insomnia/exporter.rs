//! Insomnia exporter
//!
//! Resource order: the workspace, then each folder followed by its requests
//! and its subfolders (depth-first), then the collection-level requests.

use chrono::{DateTime, Utc};
use courier_domain::{Collection, Folder, Id, Request, RequestBody};
use serde_json::Value;
use tracing::debug;

use super::types::{
    EXPORT_FORMAT, EXPORT_SOURCE, EXPORT_TYPE, InsomniaBody, InsomniaExport, InsomniaPair,
    InsomniaRequest, InsomniaRequestGroup, InsomniaResource, InsomniaWorkspace,
};
use crate::interchange::{InterchangeError, RequestIndex};
use crate::serialization::to_json_compact;

const MIME_JSON: &str = "application/json";
const MIME_TEXT: &str = "text/plain";

/// Insomnia export writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsomniaExporter;

impl InsomniaExporter {
    /// Builds the Insomnia export for `collection`, dated now. Ids missing
    /// from `requests` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON or form body cannot be serialized.
    pub fn export(
        collection: &Collection,
        requests: &RequestIndex,
    ) -> Result<InsomniaExport, InterchangeError> {
        let mut resources = vec![InsomniaResource::Workspace(InsomniaWorkspace {
            id: collection.id.clone(),
            name: Some(collection.name.clone()),
            description: Some(collection.description.clone()),
            created: Some(millis(collection.created_at)),
            modified: Some(millis(collection.updated_at)),
        })];

        for folder in &collection.folders {
            push_folder(folder, &collection.id, requests, &mut resources)?;
        }
        push_requests(&collection.requests, &collection.id, requests, &mut resources)?;

        Ok(InsomniaExport {
            kind: EXPORT_TYPE.to_string(),
            export_format: EXPORT_FORMAT,
            export_date: Utc::now().to_rfc3339(),
            export_source: EXPORT_SOURCE.to_string(),
            resources,
        })
    }
}

fn millis(at: DateTime<Utc>) -> Value {
    Value::from(at.timestamp_millis())
}

fn push_folder(
    folder: &Folder,
    parent_id: &str,
    requests: &RequestIndex,
    resources: &mut Vec<InsomniaResource>,
) -> Result<(), InterchangeError> {
    resources.push(InsomniaResource::RequestGroup(InsomniaRequestGroup {
        id: folder.id.clone(),
        parent_id: Some(parent_id.to_string()),
        name: Some(folder.name.clone()),
        description: Some(folder.description.clone()),
        created: Some(millis(folder.created_at)),
        modified: Some(millis(folder.updated_at)),
    }));

    push_requests(&folder.requests, &folder.id, requests, resources)?;
    for subfolder in &folder.subfolders {
        push_folder(subfolder, &folder.id, requests, resources)?;
    }
    Ok(())
}

fn push_requests(
    ids: &[Id],
    parent_id: &str,
    requests: &RequestIndex,
    resources: &mut Vec<InsomniaResource>,
) -> Result<(), InterchangeError> {
    for id in ids {
        let Some(request) = requests.get(id) else {
            debug!(id = %id, "dangling request reference skipped");
            continue;
        };
        resources.push(InsomniaResource::Request(export_request(request, parent_id)?));
    }
    Ok(())
}

fn pairs<'a>(entries: impl IntoIterator<Item = (&'a String, &'a String)>) -> Vec<InsomniaPair> {
    entries
        .into_iter()
        .map(|(name, value)| InsomniaPair::new(name, value))
        .collect()
}

fn export_request(request: &Request, parent_id: &str) -> Result<InsomniaRequest, InterchangeError> {
    Ok(InsomniaRequest {
        id: request.id.clone(),
        parent_id: Some(parent_id.to_string()),
        name: Some(request.name.clone()),
        description: Some(request.description.clone()),
        url: Some(request.url.clone()),
        method: Some(request.method.to_string()),
        headers: pairs(&request.headers),
        parameters: pairs(&request.params),
        body: export_body(request)?,
        created: Some(millis(request.created_at)),
        modified: Some(millis(request.updated_at)),
    })
}

fn export_body(request: &Request) -> Result<Option<InsomniaBody>, InterchangeError> {
    let body = match &request.body {
        RequestBody::None => return Ok(None),
        RequestBody::Json { content } => InsomniaBody {
            mime_type: Some(MIME_JSON.to_string()),
            text: Some(to_json_compact(content)?),
            params: Vec::new(),
        },
        RequestBody::Text { content } => InsomniaBody {
            mime_type: Some(
                if request.declares_json() { MIME_JSON } else { MIME_TEXT }.to_string(),
            ),
            text: Some(content.clone()),
            params: Vec::new(),
        },
        RequestBody::Form { fields } => InsomniaBody {
            mime_type: Some(MIME_JSON.to_string()),
            text: Some(to_json_compact(fields)?),
            params: Vec::new(),
        },
    };
    Ok(Some(body))
}
