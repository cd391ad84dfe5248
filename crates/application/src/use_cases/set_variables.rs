//! Environment variable use case.

use courier_domain::Environment;
use tracing::debug;

use crate::ports::Storage;
use crate::{ApplicationError, ApplicationResult};

/// Writes variables into a stored environment.
pub struct SetVariables<S: Storage> {
    storage: S,
}

impl<S: Storage> SetVariables<S> {
    /// Creates a new `SetVariables` use case.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stores a new environment holding `variables`.
    ///
    /// # Errors
    /// - `Storage` if the environment cannot be written
    pub async fn create(
        &self,
        name: &str,
        variables: impl IntoIterator<Item = (String, String)>,
    ) -> ApplicationResult<Environment> {
        let mut environment = Environment::new(name);
        for (key, value) in variables {
            environment.set_variable(key, value);
        }
        self.storage.save_environment(&environment).await?;
        debug!(id = %environment.id, name, "environment created");
        Ok(environment)
    }

    /// Sets `variables` on the environment `environment_id`, overwriting
    /// existing values.
    ///
    /// # Errors
    /// - `NotFound` if the environment does not exist
    /// - `Storage` if the environment cannot be read or written
    pub async fn set(
        &self,
        environment_id: &str,
        variables: impl IntoIterator<Item = (String, String)>,
    ) -> ApplicationResult<Environment> {
        let mut environment = self
            .storage
            .get_environment(environment_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("environment {environment_id}")))?;
        for (key, value) in variables {
            environment.set_variable(key, value);
        }
        self.storage.save_environment(&environment).await?;
        Ok(environment)
    }
}
