//! HTTP request body types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Request body with an explicit variant for every shape a body can take.
///
/// The `type` field is used as the discriminator for JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body.
    #[default]
    None,

    /// Raw text body. May contain `{{variables}}`.
    Text {
        /// The text content.
        content: String,
    },

    /// Structured JSON body (object, array or scalar).
    Json {
        /// The JSON content.
        content: JsonValue,
    },

    /// Flat key/value form body.
    Form {
        /// Form fields as key-value pairs.
        fields: BTreeMap<String, String>,
    },
}

impl RequestBody {
    /// Creates a text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Creates a JSON body from a `serde_json::Value`.
    #[must_use]
    pub const fn json(content: JsonValue) -> Self {
        Self::Json { content }
    }

    /// Creates a form body from key-value pairs.
    #[must_use]
    pub const fn form(fields: BTreeMap<String, String>) -> Self {
        Self::Form { fields }
    }

    /// Returns whether this is the absent body.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the variant name, as used in the serialized `type` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Text { .. } => "text",
            Self::Json { .. } => "json",
            Self::Form { .. } => "form",
        }
    }
}

/// Returns true when a `Content-Type` / mime string denotes JSON.
///
/// Accepts parameters (`; charset=utf-8`) and structured suffixes
/// (`application/vnd.api+json`). Unparseable values are not JSON.
#[must_use]
pub fn is_json_mime(value: &str) -> bool {
    value.trim().parse::<mime::Mime>().is_ok_and(|parsed| {
        parsed.subtype() == mime::JSON || parsed.suffix() == Some(mime::JSON)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_is_none() {
        assert!(RequestBody::default().is_none());
        assert_eq!(RequestBody::default().kind(), "none");
    }

    #[test]
    fn test_serialized_tag() {
        let body = RequestBody::json(json!({"name": "test"}));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({"type": "json", "content": {"name": "test"}}));

        let body = RequestBody::text("hello");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({"type": "text", "content": "hello"}));

        let value = serde_json::to_value(RequestBody::None).unwrap();
        assert_eq!(value, json!({"type": "none"}));
    }

    #[test]
    fn test_form_deserializes() {
        let body: RequestBody =
            serde_json::from_value(json!({"type": "form", "fields": {"a": "1"}})).unwrap();
        match body {
            RequestBody::Form { fields } => assert_eq!(fields.get("a").unwrap(), "1"),
            other => panic!("Expected form body, got {other:?}"),
        }
    }

    #[test]
    fn test_is_json_mime() {
        assert!(is_json_mime("application/json"));
        assert!(is_json_mime("application/json; charset=utf-8"));
        assert!(is_json_mime("application/vnd.api+json"));
        assert!(!is_json_mime("text/plain"));
        assert!(!is_json_mime("application/x-www-form-urlencoded"));
        assert!(!is_json_mime("not a mime"));
        assert!(!is_json_mime(""));
    }
}
