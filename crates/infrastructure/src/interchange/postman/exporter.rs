//! Postman exporter
//!
//! Writes Postman v2.1: collection-level requests first, then folders as
//! nested `item` arrays. Query params go to `url.query` and are never
//! spliced into `url.raw`. Every present body is a `json`-language raw block.

use courier_domain::{Collection, Folder, Id, Request, RequestBody};
use tracing::debug;

use super::types::{
    PostmanBody, PostmanBodyOptions, PostmanCollection, PostmanDescription, PostmanInfo,
    PostmanItem, PostmanKeyValue, PostmanRawOptions, PostmanRequest, PostmanRequestSpec,
    PostmanUrl, PostmanUrlObject, SCHEMA_V2_1,
};
use crate::interchange::{InterchangeError, RequestIndex};
use crate::serialization::to_json_compact;

const HEADER_TYPE: &str = "text";
const LANGUAGE_JSON: &str = "json";

/// Postman collection exporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostmanExporter;

impl PostmanExporter {
    /// Builds the Postman document for `collection`. Ids missing from
    /// `requests` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON or form body cannot be serialized.
    pub fn export(
        collection: &Collection,
        requests: &RequestIndex,
    ) -> Result<PostmanCollection, InterchangeError> {
        let mut item = export_requests(&collection.requests, requests)?;
        for folder in &collection.folders {
            item.push(export_folder(folder, requests)?);
        }

        Ok(PostmanCollection {
            info: PostmanInfo {
                postman_id: Some(collection.id.clone()),
                name: Some(collection.name.clone()),
                description: Some(PostmanDescription::Text(collection.description.clone())),
                schema: Some(SCHEMA_V2_1.to_string()),
            },
            description: None,
            item,
        })
    }
}

fn export_requests(
    ids: &[Id],
    requests: &RequestIndex,
) -> Result<Vec<PostmanItem>, InterchangeError> {
    let mut items = Vec::with_capacity(ids.len());
    for id in ids {
        match requests.get(id) {
            Some(request) => items.push(export_request(request)?),
            None => debug!(id = %id, "dangling request reference skipped"),
        }
    }
    Ok(items)
}

fn export_folder(
    folder: &Folder,
    requests: &RequestIndex,
) -> Result<PostmanItem, InterchangeError> {
    let mut item = export_requests(&folder.requests, requests)?;
    for subfolder in &folder.subfolders {
        item.push(export_folder(subfolder, requests)?);
    }

    Ok(PostmanItem {
        name: Some(folder.name.clone()),
        description: Some(PostmanDescription::Text(folder.description.clone())),
        item: Some(item),
        request: None,
    })
}

fn export_request(request: &Request) -> Result<PostmanItem, InterchangeError> {
    let header = request
        .headers
        .iter()
        .map(|(key, value)| PostmanKeyValue::new(key, value).with_kind(HEADER_TYPE))
        .collect();
    let query = request
        .params
        .iter()
        .map(|(key, value)| PostmanKeyValue::new(key, value))
        .collect();

    let detail = PostmanRequest {
        method: Some(request.method.to_string()),
        description: Some(PostmanDescription::Text(request.description.clone())),
        header,
        url: PostmanUrl::Structured(PostmanUrlObject {
            raw: Some(request.url.clone()),
            query,
        }),
        body: export_body(request)?,
    };

    Ok(PostmanItem {
        name: Some(request.name.clone()),
        description: None,
        item: None,
        request: Some(PostmanRequestSpec::Detailed(Box::new(detail))),
    })
}

fn raw_body(raw: String) -> PostmanBody {
    PostmanBody {
        mode: Some("raw".to_string()),
        raw: Some(raw),
        options: Some(PostmanBodyOptions {
            raw: Some(PostmanRawOptions {
                language: Some(LANGUAGE_JSON.to_string()),
            }),
        }),
        ..PostmanBody::default()
    }
}

// Text passes through verbatim even when it is not JSON.
fn export_body(request: &Request) -> Result<Option<PostmanBody>, InterchangeError> {
    let raw = match &request.body {
        RequestBody::None => return Ok(None),
        RequestBody::Json { content } => to_json_compact(content)?,
        RequestBody::Text { content } => content.clone(),
        RequestBody::Form { fields } => to_json_compact(fields)?,
    };
    Ok(Some(raw_body(raw)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::interchange::postman::PostmanImporter;
    use courier_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::collections::BTreeMap;

    fn index(requests: &[&Request]) -> RequestIndex {
        requests.iter().map(|r| (r.id.clone(), (*r).clone())).collect()
    }

    fn to_value(collection: &Collection, requests: &RequestIndex) -> Value {
        serde_json::to_value(PostmanExporter::export(collection, requests).unwrap()).unwrap()
    }

    #[test]
    fn test_document_shape() {
        let request = Request::new("Get user", "{{base}}/users/1")
            .with_method(HttpMethod::Get)
            .with_header("Accept", "application/json")
            .with_param("expand", "teams");
        let mut collection = Collection::new("API").with_description("demo");
        collection.add_request(request.id.clone());

        let value = to_value(&collection, &index(&[&request]));

        assert_eq!(value["info"]["_postman_id"], json!(collection.id));
        assert_eq!(value["info"]["schema"], json!(SCHEMA_V2_1));
        assert_eq!(value["info"]["description"], json!("demo"));
        let leaf = &value["item"][0];
        assert_eq!(leaf["name"], json!("Get user"));
        assert_eq!(leaf["request"]["method"], json!("GET"));
        assert_eq!(
            leaf["request"]["header"],
            json!([{"key": "Accept", "value": "application/json", "type": "text"}])
        );
        assert_eq!(
            leaf["request"]["url"],
            json!({"raw": "{{base}}/users/1", "query": [{"key": "expand", "value": "teams"}]})
        );
        assert!(leaf["request"].get("body").is_none());
    }

    #[test]
    fn test_direct_requests_precede_folders() {
        let direct = Request::new("direct", "u1");
        let nested = Request::new("nested", "u2");
        let mut inner = Folder::new("inner");
        inner.add_request(nested.id.clone());
        let mut outer = Folder::new("outer");
        outer.add_subfolder(inner);
        let mut collection = Collection::new("c");
        collection.add_folder(outer);
        collection.add_request(direct.id.clone());

        let value = to_value(&collection, &index(&[&direct, &nested]));

        assert_eq!(value["item"][0]["name"], json!("direct"));
        assert_eq!(value["item"][1]["name"], json!("outer"));
        assert_eq!(value["item"][1]["item"][0]["name"], json!("inner"));
        assert_eq!(value["item"][1]["item"][0]["item"][0]["name"], json!("nested"));
    }

    #[test]
    fn test_dangling_references_skipped() {
        let kept = Request::new("kept", "u");
        let mut collection = Collection::new("c");
        collection.add_request("gone");
        collection.add_request(kept.id.clone());

        let value = to_value(&collection, &index(&[&kept]));
        assert_eq!(value["item"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_body_encodings() {
        let json_body = Request::new("j", "u").with_body(RequestBody::json(json!({"a": [1]})));
        let labelled = Request::new("l", "u")
            .with_header("content-type", "application/json")
            .with_body(RequestBody::text("{\"id\": {{id}}}"));
        let plain = Request::new("p", "u").with_body(RequestBody::text("hello"));
        let mut fields = BTreeMap::new();
        fields.insert("user".to_string(), "{{id}}".to_string());
        let form = Request::new("f", "u").with_body(RequestBody::form(fields));

        let mut collection = Collection::new("c");
        for request in [&json_body, &labelled, &plain, &form] {
            collection.add_request(request.id.clone());
        }
        let value = to_value(&collection, &index(&[&json_body, &labelled, &plain, &form]));

        let body = |i: usize| value["item"][i]["request"]["body"].clone();
        let raw_json = |raw: &str| json!({"mode": "raw", "raw": raw, "options": {"raw": {"language": "json"}}});
        assert_eq!(body(0), raw_json("{\"a\":[1]}"));
        assert_eq!(body(1), raw_json("{\"id\": {{id}}}"));
        assert_eq!(body(2), raw_json("hello"));
        assert_eq!(body(3), raw_json("{\"user\":\"{{id}}\"}"));
    }

    #[test]
    fn test_text_and_form_bodies_reimport() {
        let plain = Request::new("p", "u").with_body(RequestBody::text("hello"));
        let mut fields = BTreeMap::new();
        fields.insert("a".to_string(), "1".to_string());
        let form = Request::new("f", "u").with_body(RequestBody::form(fields));
        let mut collection = Collection::new("c");
        collection.add_request(plain.id.clone());
        collection.add_request(form.id.clone());

        let document = to_value(&collection, &index(&[&plain, &form]));
        let tree = PostmanImporter::new().import_document(&document).unwrap();

        assert_eq!(tree.requests[0].body, RequestBody::text("hello"));
        assert_eq!(tree.requests[1].body, RequestBody::json(json!({"a": "1"})));
    }

    #[test]
    fn test_round_trip_through_importer() {
        let request = Request::new("Create", "https://e/users")
            .with_method(HttpMethod::Post)
            .with_header("Content-Type", "application/json")
            .with_param("dry_run", "1")
            .with_body(RequestBody::json(json!({"name": "{{name}}"})));
        let mut folder = Folder::new("Users").with_description("user ops");
        folder.add_request(request.id.clone());
        let mut collection = Collection::new("API");
        collection.add_folder(folder);

        let document = to_value(&collection, &index(&[&request]));
        let tree = PostmanImporter::new().import_document(&document).unwrap();

        assert_eq!(tree.collection.name, "API");
        assert_eq!(tree.collection.folders[0].name, "Users");
        assert_eq!(tree.collection.folders[0].description, "user ops");
        let imported = &tree.requests[0];
        assert_eq!(imported.method, HttpMethod::Post);
        assert_eq!(imported.url, "https://e/users");
        assert_eq!(imported.headers, request.headers);
        assert_eq!(imported.params, request.params);
        assert_eq!(imported.body, request.body);
    }
}
