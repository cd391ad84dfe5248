//! Stored HTTP request templates.

mod body;
mod method;

pub use body::{RequestBody, is_json_mime};
pub use method::HttpMethod;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::id::{Id, generate_id};

/// Name of the header consulted by [`Request::content_type`].
pub const CONTENT_TYPE: &str = "Content-Type";

/// A stored, nameable HTTP call template addressable by id.
///
/// Requests live in storage on their own and are referenced by id from
/// collections and folders. Every string field may contain `{{variables}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Unique identifier.
    pub id: Id,

    /// Human-readable request name.
    pub name: String,

    /// Target URL template.
    pub url: String,

    /// HTTP method.
    #[serde(default)]
    pub method: HttpMethod,

    /// Request headers. Keys are kept exactly as entered.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Query parameters.
    #[serde(default)]
    pub params: BTreeMap<String, String>,

    /// Request body.
    #[serde(default)]
    pub body: RequestBody,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Request {
    /// Creates a GET request with a fresh id and equal timestamps.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            url: url.into(),
            method: HttpMethod::default(),
            headers: BTreeMap::new(),
            params: BTreeMap::new(),
            body: RequestBody::None,
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replaces all headers.
    #[must_use]
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Refreshes the updated timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Returns the `Content-Type` header value, matching the name case-insensitively.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE))
            .map(|(_, value)| value.as_str())
    }

    /// Returns true when the request declares a JSON content type.
    #[must_use]
    pub fn declares_json(&self) -> bool {
        self.content_type().is_some_and(is_json_mime)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_request_defaults() {
        let request = Request::new("List users", "{{base_url}}/users");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.created_at, request.updated_at);
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
        assert_eq!(request.id.len(), 36);
    }

    #[test]
    fn test_touch_moves_updated_at_only() {
        let mut request = Request::new("r", "https://example.com");
        let created = request.created_at;
        request.touch();
        assert_eq!(request.created_at, created);
        assert!(request.updated_at >= created);
    }

    #[test]
    fn test_content_type_is_case_insensitive() {
        let request = Request::new("r", "u").with_header("content-type", "application/json");
        assert_eq!(request.content_type(), Some("application/json"));
        assert!(request.declares_json());

        let request = Request::new("r", "u").with_header("Content-Type", "text/plain");
        assert!(!request.declares_json());

        assert_eq!(Request::new("r", "u").content_type(), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let request = Request::new("Create", "https://api.example.com/users")
            .with_method(HttpMethod::Post)
            .with_header("Accept", "application/json")
            .with_param("page", "1")
            .with_body(RequestBody::json(json!({"name": "{{user}}"})))
            .with_description("Creates a user");

        let encoded = serde_json::to_string(&request).unwrap();
        let decoded: Request = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let decoded: Request = serde_json::from_value(json!({
            "id": "abc",
            "name": "Ping",
            "url": "https://example.com/ping",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(decoded.method, HttpMethod::Get);
        assert!(decoded.body.is_none());
        assert!(decoded.params.is_empty());
    }
}
