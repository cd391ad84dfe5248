//! Environment domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::id::{Id, generate_id};

/// Flat variable mapping consulted by placeholder substitution.
pub type VariableMap = BTreeMap<String, String>;

/// A named flat set of substitution variables, independent of any collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier.
    pub id: Id,

    /// Environment name (e.g., "development").
    pub name: String,

    /// Variable name to value.
    #[serde(default)]
    pub variables: VariableMap,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Environment {
    /// Creates an empty environment with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            variables: VariableMap::new(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds a variable (builder style).
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets or replaces a variable.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
        self.touch();
    }

    /// Removes a variable, returning its previous value.
    pub fn remove_variable(&mut self, name: &str) -> Option<String> {
        let removed = self.variables.remove(name);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Refreshes the updated timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_environment_variables() {
        let mut env = Environment::new("development").with_variable("host", "localhost");
        assert_eq!(env.variables.get("host").map(String::as_str), Some("localhost"));

        env.set_variable("port", "8080");
        assert_eq!(env.variables.len(), 2);
        assert!(env.updated_at >= env.created_at);

        assert_eq!(env.remove_variable("host"), Some("localhost".to_string()));
        assert_eq!(env.remove_variable("host"), None);
    }
}
