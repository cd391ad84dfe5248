//! Postman Collection type definitions
//!
//! Covers the v2.x layout (`info` + nested `item`) and the v1 layout (flat
//! `requests` + `order`). Every optional field uses `#[serde(default)]` so
//! hand-edited or older exports still load.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// Schema URL written into exported collections.
pub const SCHEMA_V2_1: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// A description is either plain text or a `{content, type}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostmanDescription {
    Text(String),
    Rich {
        #[serde(default)]
        content: String,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
}

impl PostmanDescription {
    /// The description text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Rich { content: text, .. } => text,
        }
    }
}

/// Root of a v2.x collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanCollection {
    pub info: PostmanInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<PostmanDescription>,
    #[serde(default)]
    pub item: Vec<PostmanItem>,
}

/// Collection metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanInfo {
    #[serde(rename = "_postman_id", default, skip_serializing_if = "Option::is_none")]
    pub postman_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<PostmanDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// A folder (has `item`) or a request leaf (has `request`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<PostmanDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<Self>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<PostmanRequestSpec>,
}

/// A request is either a bare URL or a full definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostmanRequestSpec {
    Url(String),
    Detailed(Box<PostmanRequest>),
}

/// Full request definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<PostmanDescription>,
    #[serde(default)]
    pub header: Vec<PostmanKeyValue>,
    #[serde(default)]
    pub url: PostmanUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<PostmanBody>,
}

/// URL as a plain string or a structured object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostmanUrl {
    #[default]
    Empty,
    Raw(String),
    Structured(PostmanUrlObject),
}

impl PostmanUrl {
    /// The raw URL string, empty when absent.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Raw(raw) => raw,
            Self::Structured(url) => url.raw.as_deref().unwrap_or_default(),
        }
    }

    /// Structured query entries; a plain string has none.
    #[must_use]
    pub fn query(&self) -> &[PostmanKeyValue] {
        match self {
            Self::Structured(url) => &url.query,
            Self::Empty | Self::Raw(_) => &[],
        }
    }
}

/// Structured URL object. Host/path/port pieces are not needed and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanUrlObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default)]
    pub query: Vec<PostmanKeyValue>,
}

const fn is_false(value: &bool) -> bool {
    !*value
}

/// Header, query, urlencoded and formdata entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanKeyValue {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

impl PostmanKeyValue {
    /// Creates an enabled entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            kind: None,
            disabled: false,
        }
    }

    /// Sets the `type` field.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// The `(key, value)` pair, unless the entry is disabled or keyless.
    #[must_use]
    pub fn enabled_pair(&self) -> Option<(String, String)> {
        if self.disabled {
            return None;
        }
        let key = self.key.clone()?;
        Some((key, self.value.clone().unwrap_or_default()))
    }
}

/// Request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urlencoded: Vec<PostmanKeyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formdata: Vec<PostmanKeyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PostmanBodyOptions>,
}

impl PostmanBody {
    /// The `options.raw.language` marker, if any.
    #[must_use]
    pub fn raw_language(&self) -> Option<&str> {
        self.options
            .as_ref()?
            .raw
            .as_ref()?
            .language
            .as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanBodyOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<PostmanRawOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanRawOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Root of a v1 collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyCollection {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<PostmanDescription>,
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub requests: Vec<LegacyRequest>,
}

/// A v1 request entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<PostmanDescription>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    /// `Key: Value` lines.
    #[serde(default)]
    pub headers: Option<String>,
    #[serde(rename = "queryParams", alias = "parameters", default)]
    pub query_params: Option<Vec<LegacyParam>>,
    #[serde(rename = "dataMode", default)]
    pub data_mode: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<LegacyParam>>,
    #[serde(rename = "rawModeData", default)]
    pub raw_mode_data: Option<String>,
}

const fn enabled_by_default() -> bool {
    true
}

/// A v1 query or form entry.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyParam {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl LegacyParam {
    /// The `(key, value)` pair, unless the entry is disabled or keyless.
    #[must_use]
    pub fn enabled_pair(&self) -> Option<(String, String)> {
        if !self.enabled {
            return None;
        }
        Some((self.key.clone()?, self.value.clone().unwrap_or_default()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_collection() {
        let json = r#"{
            "info": {
                "name": "Test Collection",
                "_postman_id": "abc123",
                "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
            },
            "item": []
        }"#;

        let collection: PostmanCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.info.name.as_deref(), Some("Test Collection"));
        assert_eq!(collection.info.postman_id.as_deref(), Some("abc123"));
        assert!(collection.item.is_empty());
    }

    #[test]
    fn test_request_forms() {
        let bare: PostmanItem =
            serde_json::from_str(r#"{"name": "r", "request": "https://e/x"}"#).unwrap();
        assert!(matches!(bare.request, Some(PostmanRequestSpec::Url(ref u)) if u == "https://e/x"));

        let full: PostmanItem = serde_json::from_str(
            r#"{"name": "r", "request": {"method": "POST", "url": {"raw": "https://e/y", "host": ["e"]}}}"#,
        )
        .unwrap();
        let Some(PostmanRequestSpec::Detailed(request)) = full.request else {
            panic!("expected a detailed request");
        };
        assert_eq!(request.method.as_deref(), Some("POST"));
        assert_eq!(request.url.raw(), "https://e/y");
    }

    #[test]
    fn test_description_shapes() {
        let plain: PostmanDescription = serde_json::from_str(r#""hello""#).unwrap();
        let rich: PostmanDescription =
            serde_json::from_str(r#"{"content": "hello", "type": "text/markdown"}"#).unwrap();
        assert_eq!(plain.text(), "hello");
        assert_eq!(rich.text(), "hello");
    }

    #[test]
    fn test_raw_language() {
        let body: PostmanBody = serde_json::from_str(
            r#"{"mode": "raw", "raw": "{}", "options": {"raw": {"language": "json"}}}"#,
        )
        .unwrap();
        assert_eq!(body.raw_language(), Some("json"));
        assert_eq!(PostmanBody::default().raw_language(), None);
    }

    #[test]
    fn test_key_value_pairs() {
        let disabled: PostmanKeyValue =
            serde_json::from_str(r#"{"key": "a", "value": "1", "disabled": true}"#).unwrap();
        let null_value: PostmanKeyValue =
            serde_json::from_str(r#"{"key": "b", "value": null}"#).unwrap();
        assert_eq!(disabled.enabled_pair(), None);
        assert_eq!(
            null_value.enabled_pair(),
            Some(("b".to_string(), String::new()))
        );
    }

    #[test]
    fn test_legacy_parameters_alias() {
        let request: LegacyRequest = serde_json::from_str(
            r#"{"id": "1", "parameters": [{"key": "q", "value": "x"}, {"key": "off", "value": "y", "enabled": false}]}"#,
        )
        .unwrap();
        let pairs: Vec<_> = request
            .query_params
            .unwrap()
            .iter()
            .filter_map(LegacyParam::enabled_pair)
            .collect();
        assert_eq!(pairs, vec![("q".to_string(), "x".to_string())]);
    }
}
