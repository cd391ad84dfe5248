//! Signature-based format detection.

use serde_json::Value;

/// Format of a parsed interchange document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedFormat {
    /// Postman v2.x: an `info` object with a `schema` key, and an `item` array.
    PostmanModern,
    /// Postman v1: top-level `id`, `name` and `order`.
    PostmanLegacy,
    /// Insomnia export: `_type` is `"export"` and `resources` is an array.
    Insomnia,
    /// None of the above.
    Unknown,
}

/// Classifies a document by its top-level keys. Modern Postman is checked
/// before legacy Postman, and both before Insomnia.
#[must_use]
pub fn detect_format(document: &Value) -> DetectedFormat {
    let Some(root) = document.as_object() else {
        return DetectedFormat::Unknown;
    };

    let has_schema = root
        .get("info")
        .and_then(Value::as_object)
        .is_some_and(|info| info.contains_key("schema"));
    if has_schema && root.get("item").is_some_and(Value::is_array) {
        return DetectedFormat::PostmanModern;
    }

    if ["id", "name", "order"].iter().all(|key| root.contains_key(*key)) {
        return DetectedFormat::PostmanLegacy;
    }

    if root.get("_type").and_then(Value::as_str) == Some("export")
        && root.get("resources").is_some_and(Value::is_array)
    {
        return DetectedFormat::Insomnia;
    }

    DetectedFormat::Unknown
}
