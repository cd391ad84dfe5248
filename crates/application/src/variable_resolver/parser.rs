//! Variable parser for {{variable}} syntax
//!
//! Parses strings to extract variable references with their positions.

use std::collections::BTreeSet;
use std::ops::Range;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Represents a parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without {{ }}), trimmed of surrounding whitespace.
    pub name: String,

    /// Byte range in the original string where this reference appears.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parses a string and extracts all variable references, left to right.
///
/// A reference is `{{`, one or more characters that are neither `{` nor `}`,
/// then `}}`. The name is trimmed; references whose name is blank are skipped.
/// There is no escaping and no nesting: in `{{{a}}` the reference starts at
/// the second brace.
///
/// # Examples
///
/// ```
/// use courier_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("Hello {{name}}, your id is {{ user_id }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "name");
/// assert_eq!(refs[1].name, "user_id");
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let bytes = input.as_bytes();
    let mut references = Vec::new();
    let mut start = 0;

    while let Some(offset) = input[start..].find(OPEN) {
        let open = start + offset;
        let name_start = open + OPEN.len();
        let name_end = bytes[name_start..]
            .iter()
            .position(|b| *b == b'{' || *b == b'}')
            .map_or(bytes.len(), |p| name_start + p);

        if name_end > name_start && input[name_end..].starts_with(CLOSE) {
            let end = name_end + CLOSE.len();
            let name = input[name_start..name_end].trim();
            if !name.is_empty() {
                references.push(VariableReference::new(name, open..end));
            }
            start = end;
        } else {
            // Braces are ASCII, so open + 1 is always a char boundary.
            start = open + 1;
        }
    }

    references
}

/// Returns true if the input string contains any variable references.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    !parse_variables(input).is_empty()
}

/// Extracts the distinct variable names referenced in the input.
#[must_use]
pub fn extract_names(input: &str) -> BTreeSet<String> {
    parse_variables(input).into_iter().map(|r| r.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_variable() {
        let refs = parse_variables("{{name}}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "name");
        assert_eq!(refs[0].span, 0..8);
    }

    #[test]
    fn test_parse_multiple_variables() {
        let refs = parse_variables("{{base_url}}/api/{{version}}/users/{{id}}");
        let names: Vec<_> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["base_url", "version", "id"]);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let refs = parse_variables("{{ name }}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "name");
        assert_eq!(refs[0].span, 0..10);
    }

    #[test]
    fn test_no_variables() {
        assert!(parse_variables("Hello, World!").is_empty());
    }

    #[test]
    fn test_unclosed_variable() {
        assert!(parse_variables("{{name").is_empty());
        assert!(parse_variables("{{name}").is_empty());
    }

    #[test]
    fn test_empty_and_blank_variables() {
        assert!(parse_variables("{{}}").is_empty());
        assert!(parse_variables("{{   }}").is_empty());
    }

    #[test]
    fn test_no_nested_braces() {
        // The inner `{` breaks the first candidate; scanning resumes one byte later.
        let input = "{{{a}}";
        let refs = parse_variables(input);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "a");
        assert_eq!(&input[refs[0].span.clone()], "{{a}}");

        assert!(parse_variables("{{a}b}}").is_empty());
        assert!(parse_variables("{{a{b}}").is_empty());
    }

    #[test]
    fn test_variable_in_json() {
        let refs = parse_variables(r#"{"name": "{{user_name}}", "id": "{{user_id}}"}"#);
        let names: Vec<_> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["user_name", "user_id"]);
    }

    #[test]
    fn test_adjacent_variables() {
        let refs = parse_variables("{{a}}{{b}}{{c}}");
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[2].span, 10..15);
    }

    #[test]
    fn test_single_brace() {
        assert!(parse_variables("{name}").is_empty());
    }

    #[test]
    fn test_multibyte_text_around_variables() {
        let input = "héllo {{ñame}} wörld";
        let refs = parse_variables(input);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "ñame");
        assert_eq!(&input[refs[0].span.clone()], "{{ñame}}");
    }

    #[test]
    fn test_has_variables() {
        assert!(has_variables("{{name}}"));
        assert!(has_variables("Hello {{name}}!"));
        assert!(!has_variables("Hello World!"));
        assert!(!has_variables("{{incomplete"));
        assert!(!has_variables("}} {{"));
    }

    #[test]
    fn test_extract_names_dedupes_and_trims() {
        let names = extract_names("{{a}} and {{ b }} and {{a}}");
        let expected: BTreeSet<String> = ["a", "b"].iter().map(ToString::to_string).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_span_positions() {
        let input = "Hello {{name}}, welcome!";
        let refs = parse_variables(input);
        assert_eq!(&input[refs[0].span.clone()], "{{name}}");
    }
}
