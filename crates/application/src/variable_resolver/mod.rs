//! Variable resolution module
//!
//! Provides parsing and resolution of `{{variable}}` syntax in strings,
//! mappings, JSON values and whole requests.
//!
//! # Usage
//!
//! ```
//! use courier_application::variable_resolver::VariableResolver;
//! use courier_domain::Environment;
//!
//! let env = Environment::new("development").with_variable("host", "localhost");
//! let resolver = VariableResolver::from_environment(&env);
//!
//! let result = resolver.resolve("http://{{host}}/api/{{version}}");
//! assert_eq!(result.resolved, "http://localhost/api/{{version}}");
//! assert_eq!(result.unresolved, vec!["version"]);
//! ```

pub mod engine;
pub mod parser;

pub use engine::{ResolutionResult, VariableResolver};
pub use parser::{VariableReference, extract_names, has_variables, parse_variables};
