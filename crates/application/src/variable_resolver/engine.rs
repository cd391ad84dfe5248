//! Variable resolution engine
//!
//! Substitutes `{{variable}}` references from a flat variable mapping.
//! Substitution is a single left-to-right pass: substituted values are never
//! scanned again.

use std::collections::BTreeMap;

use courier_domain::{Environment, Request, RequestBody, VariableMap};
use serde_json::Value;

use super::parser::parse_variables;

/// Result of variable resolution for a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The input with every known variable substituted.
    pub resolved: String,

    /// Names that were substituted, in order of appearance.
    pub resolved_names: Vec<String>,

    /// Names left verbatim because the mapping has no value for them.
    pub unresolved: Vec<String>,

    /// Whether every reference was substituted.
    pub is_complete: bool,
}

impl ResolutionResult {
    /// Creates a result for input with no variables.
    #[must_use]
    pub fn no_variables(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            resolved_names: Vec::new(),
            unresolved: Vec::new(),
            is_complete: true,
        }
    }

    /// Returns the count of resolved references.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.resolved_names.len()
    }

    /// Returns the count of unresolved references.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

/// The variable resolution engine.
#[derive(Debug, Clone, Default)]
pub struct VariableResolver {
    variables: VariableMap,
}

impl VariableResolver {
    /// Creates a resolver over the given variables.
    #[must_use]
    pub const fn new(variables: VariableMap) -> Self {
        Self { variables }
    }

    /// Creates a resolver with no variables. Every reference stays verbatim.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a resolver over an environment's variables.
    #[must_use]
    pub fn from_environment(environment: &Environment) -> Self {
        Self::new(environment.variables.clone())
    }

    /// Returns the variables this resolver substitutes.
    #[must_use]
    pub const fn variables(&self) -> &VariableMap {
        &self.variables
    }

    /// Resolves all variables in the input string.
    #[must_use]
    pub fn resolve(&self, input: &str) -> ResolutionResult {
        let references = parse_variables(input);

        if references.is_empty() {
            return ResolutionResult::no_variables(input);
        }

        let mut resolved_names = Vec::new();
        let mut unresolved = Vec::new();
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for var_ref in &references {
            result.push_str(&input[last_end..var_ref.span.start]);

            if let Some(value) = self.variables.get(&var_ref.name) {
                result.push_str(value);
                resolved_names.push(var_ref.name.clone());
            } else {
                result.push_str(&input[var_ref.span.clone()]);
                unresolved.push(var_ref.name.clone());
            }

            last_end = var_ref.span.end;
        }

        result.push_str(&input[last_end..]);

        let is_complete = unresolved.is_empty();
        ResolutionResult {
            resolved: result,
            resolved_names,
            unresolved,
            is_complete,
        }
    }

    /// Substitutes variables in a string, discarding the bookkeeping.
    #[must_use]
    pub fn resolve_string(&self, input: &str) -> String {
        self.resolve(input).resolved
    }

    /// Substitutes variables in every value of a mapping. Keys are kept as-is.
    #[must_use]
    pub fn resolve_mapping(&self, mapping: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        mapping
            .iter()
            .map(|(key, value)| (key.clone(), self.resolve_string(value)))
            .collect()
    }

    /// Substitutes variables in every string leaf of a JSON value.
    ///
    /// Object keys, numbers, booleans and null pass through unchanged.
    #[must_use]
    pub fn resolve_structured(&self, value: &Value) -> Value {
        match value {
            Value::String(text) => Value::String(self.resolve_string(text)),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.resolve_structured(item)).collect())
            }
            Value::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, field)| (key.clone(), self.resolve_structured(field)))
                    .collect(),
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        }
    }

    /// Substitutes variables inside a body, keeping its variant.
    #[must_use]
    pub fn resolve_body(&self, body: &RequestBody) -> RequestBody {
        match body {
            RequestBody::None => RequestBody::None,
            RequestBody::Text { content } => RequestBody::text(self.resolve_string(content)),
            RequestBody::Json { content } => RequestBody::json(self.resolve_structured(content)),
            RequestBody::Form { fields } => RequestBody::form(self.resolve_mapping(fields)),
        }
    }

    /// Builds the dispatch-ready copy of a request.
    ///
    /// The copy keeps the id, method, description and timestamps; name, url,
    /// header values, param values and body are substituted. The input is
    /// left untouched.
    #[must_use]
    pub fn resolve_request(&self, request: &Request) -> Request {
        Request {
            name: self.resolve_string(&request.name),
            url: self.resolve_string(&request.url),
            headers: self.resolve_mapping(&request.headers),
            params: self.resolve_mapping(&request.params),
            body: self.resolve_body(&request.body),
            ..request.clone()
        }
    }

    /// Lists the referenced names this resolver has no value for.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        parse_variables(input)
            .into_iter()
            .filter(|r| !self.variables.contains_key(&r.name))
            .map(|r| r.name)
            .collect()
    }

    /// Lists the names a request references without a value, in order of
    /// first appearance: header values, param values, url, name, then body.
    ///
    /// Body text, form values and JSON string leaves are all scanned.
    #[must_use]
    pub fn find_unresolved_in_request(&self, request: &Request) -> Vec<String> {
        let mut sources: Vec<&str> = request
            .headers
            .values()
            .chain(request.params.values())
            .map(String::as_str)
            .chain([request.url.as_str(), request.name.as_str()])
            .collect();
        match &request.body {
            RequestBody::None => {}
            RequestBody::Text { content } => sources.push(content),
            RequestBody::Form { fields } => sources.extend(fields.values().map(String::as_str)),
            RequestBody::Json { content } => collect_strings(content, &mut sources),
        }

        let mut unresolved = Vec::new();
        for source in sources {
            for name in self.find_unresolved(source) {
                if !unresolved.contains(&name) {
                    unresolved.push(name);
                }
            }
        }
        unresolved
    }
}

fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(text) => out.push(text),
        Value::Array(items) => items.iter().for_each(|item| collect_strings(item, out)),
        Value::Object(fields) => fields.values().for_each(|field| collect_strings(field, out)),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
