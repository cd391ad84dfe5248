//! Resolve request for dispatch use case.

use courier_domain::{Request, VariableMap};
use tracing::debug;

use crate::ports::Storage;
use crate::variable_resolver::VariableResolver;
use crate::{ApplicationError, ApplicationResult};

/// Substitutes `{{variables}}` across a request and returns the dispatch copy.
///
/// The stored request is never touched; the copy keeps its id and timestamps.
#[must_use]
pub fn resolve_request_for_dispatch(request: &Request, variables: &VariableMap) -> Request {
    VariableResolver::new(variables.clone()).resolve_request(request)
}

/// Output from resolving a stored request.
#[derive(Debug, Clone)]
pub struct ResolveRequestOutput {
    /// The dispatch-ready request.
    pub request: Request,
    /// Referenced names that had no value, in order of first appearance.
    pub unresolved: Vec<String>,
}

/// Loads a stored request and resolves it against an optional environment.
pub struct ResolveRequestForDispatch<S: Storage> {
    storage: S,
}

impl<S: Storage> ResolveRequestForDispatch<S> {
    /// Creates a new `ResolveRequestForDispatch` use case.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Resolves the request `request_id`, substituting from `environment_id`
    /// when given.
    ///
    /// # Errors
    /// - `NotFound` if the request or environment does not exist
    /// - `Storage` if a record cannot be read
    pub async fn execute(
        &self,
        request_id: &str,
        environment_id: Option<&str>,
    ) -> ApplicationResult<ResolveRequestOutput> {
        let request = self
            .storage
            .get_request(request_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("request {request_id}")))?;

        let resolver = match environment_id {
            Some(id) => {
                let environment = self
                    .storage
                    .get_environment(id)
                    .await?
                    .ok_or_else(|| ApplicationError::NotFound(format!("environment {id}")))?;
                VariableResolver::from_environment(&environment)
            }
            None => VariableResolver::empty(),
        };

        let unresolved = resolver.find_unresolved_in_request(&request);
        if !unresolved.is_empty() {
            debug!(request_id, ?unresolved, "request has unresolved variables");
        }

        Ok(ResolveRequestOutput {
            request: resolver.resolve_request(&request),
            unresolved,
        })
    }
}
