//! Body content sniffing shared by both formats.
//!
//! Precedence: an explicit marker (content type, mime type, raw language)
//! first, a successful structural parse second, raw text otherwise.

use courier_domain::{RequestBody, is_json_mime};
use serde_json::Value;

/// What the source document says about a body's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyHint {
    /// Marked as JSON: parse, falling back to text when parsing fails.
    Json,
    /// Marked as something other than JSON: keep as text.
    Text,
    /// No marker: keep as JSON only if it parses to an object or array.
    Unspecified,
}

impl BodyHint {
    /// Hint from a mime type such as `application/json; charset=utf-8`.
    #[must_use]
    pub fn from_mime(mime: Option<&str>) -> Self {
        match mime {
            Some(mime) if is_json_mime(mime) => Self::Json,
            Some(mime) if !mime.trim().is_empty() => Self::Text,
            _ => Self::Unspecified,
        }
    }
}

/// Turns raw body text into a [`RequestBody`]. Empty text is no body.
#[must_use]
pub fn sniff_body(text: &str, hint: BodyHint) -> RequestBody {
    if text.is_empty() {
        return RequestBody::None;
    }
    match hint {
        BodyHint::Json => serde_json::from_str(text)
            .map_or_else(|_| RequestBody::text(text), RequestBody::json),
        BodyHint::Text => RequestBody::text(text),
        BodyHint::Unspecified => match serde_json::from_str::<Value>(text) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => RequestBody::json(value),
            _ => RequestBody::text(text),
        },
    }
}
