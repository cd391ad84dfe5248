//! Insomnia export (format 4) type definitions
//!
//! An export is a flat `resources` list; the tree is rebuilt from each
//! resource's `parentId`. Only the three resource kinds below are read,
//! everything else in an export (environments, cookie jars, specs) is
//! skipped by the importer.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of the top-level `_type` key.
pub const EXPORT_TYPE: &str = "export";
/// Export format version written by the exporter.
pub const EXPORT_FORMAT: u32 = 4;
/// Value of `__export_source` in written documents.
pub const EXPORT_SOURCE: &str = "courier";

/// Resource kinds the importer understands.
pub const KNOWN_RESOURCE_TYPES: [&str; 3] = ["workspace", "request_group", "request"];

/// A document being imported. Resources stay untyped until their `_type`
/// says they are one we read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsomniaDocument {
    #[serde(default)]
    pub resources: Vec<Value>,
}

/// A document being exported.
#[derive(Debug, Clone, Serialize)]
pub struct InsomniaExport {
    #[serde(rename = "_type")]
    pub kind: String,
    #[serde(rename = "__export_format")]
    pub export_format: u32,
    #[serde(rename = "__export_date")]
    pub export_date: String,
    #[serde(rename = "__export_source")]
    pub export_source: String,
    pub resources: Vec<InsomniaResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "snake_case")]
pub enum InsomniaResource {
    Workspace(InsomniaWorkspace),
    RequestGroup(InsomniaRequestGroup),
    Request(InsomniaRequest),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsomniaWorkspace {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<Value>,
}

/// A folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsomniaRequestGroup {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsomniaRequest {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: Vec<InsomniaPair>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<InsomniaPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<InsomniaBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<Value>,
}

/// A `{name, value}` entry used for headers, parameters and form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsomniaPair {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

impl InsomniaPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            disabled: false,
        }
    }

    /// The entry as a pair, unless it is disabled or has no name.
    #[must_use]
    pub fn enabled_pair(&self) -> Option<(String, String)> {
        (!self.disabled && !self.name.is_empty()).then(|| (self.name.clone(), self.value.clone()))
    }
}

const fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsomniaBody {
    #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<InsomniaPair>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_resource_tagging() {
        let value = json!({
            "_id": "fld_1",
            "_type": "request_group",
            "parentId": "wrk_1",
            "name": "Users"
        });
        let resource = InsomniaResource::deserialize(&value).unwrap();
        let InsomniaResource::RequestGroup(group) = &resource else {
            panic!("expected a request group");
        };
        assert_eq!(group.parent_id.as_deref(), Some("wrk_1"));
        assert_eq!(serde_json::to_value(&resource).unwrap(), value);
    }

    #[test]
    fn test_request_defaults() {
        let value = json!({"_id": "req_1", "_type": "request", "body": {}});
        let InsomniaResource::Request(request) = InsomniaResource::deserialize(&value).unwrap()
        else {
            panic!("expected a request");
        };
        assert!(request.headers.is_empty());
        assert!(request.method.is_none());
        let body = request.body.unwrap();
        assert!(body.mime_type.is_none() && body.text.is_none() && body.params.is_empty());
    }

    #[test]
    fn test_pair_enabled() {
        let disabled: InsomniaPair =
            serde_json::from_value(json!({"name": "a", "value": "1", "disabled": true})).unwrap();
        assert_eq!(disabled.enabled_pair(), None);
        assert_eq!(InsomniaPair::new("", "x").enabled_pair(), None);
        assert_eq!(
            InsomniaPair::new("b", "2").enabled_pair(),
            Some(("b".to_string(), "2".to_string()))
        );
        assert_eq!(
            serde_json::to_value(InsomniaPair::new("b", "2")).unwrap(),
            json!({"name": "b", "value": "2"})
        );
    }
}
