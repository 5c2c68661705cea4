//! Environment use cases.

use courier_domain::{Environment, NewEnvironment};
use tracing::{debug, info};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{ApiBackend, AuthToken};

/// Loads the environments owned by the signed-in user.
pub struct LoadEnvironments<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> LoadEnvironments<'a, B> {
    /// Creates a new `LoadEnvironments` use case.
    #[must_use]
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Executes the use case.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the list cannot be fetched.
    pub async fn execute(&self, token: &AuthToken) -> ApplicationResult<Vec<Environment>> {
        let environments = self.backend.environments(token).await?;
        debug!(count = environments.len(), "environments loaded");
        Ok(environments)
    }
}

/// Creates an environment from a name and a JSON object of variables.
pub struct CreateEnvironment<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> CreateEnvironment<'a, B> {
    /// Creates a new `CreateEnvironment` use case.
    #[must_use]
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Validates the input and creates the environment on the backend.
    ///
    /// # Errors
    ///
    /// - `IncompleteEnvironment` if the name or variables text is blank
    /// - `InvalidVariables` if the variables text is not a JSON object
    /// - `Backend` if the backend rejects it
    pub async fn execute(
        &self,
        name: &str,
        variables: &str,
        token: &AuthToken,
    ) -> ApplicationResult<Environment> {
        if name.trim().is_empty() || variables.trim().is_empty() {
            return Err(ApplicationError::IncompleteEnvironment);
        }
        let variables =
            NewEnvironment::parse_variables(variables).ok_or(ApplicationError::InvalidVariables)?;

        let created = self
            .backend
            .create_environment(
                &NewEnvironment {
                    name: name.to_string(),
                    variables,
                },
                token,
            )
            .await?;

        info!(id = %created.id, name = %created.name, "environment created");
        Ok(created)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::BackendError;
    use crate::test_support::{MockBackend, token};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_load_environments() {
        let backend = MockBackend::new()
            .with_environment(Environment::new("1", "dev").with_variable("base", "http://dev"));

        let envs = LoadEnvironments::new(&backend).execute(&token()).await.unwrap();
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].get("base"), Some("http://dev"));
    }

    #[tokio::test]
    async fn test_load_rejected() {
        let backend = MockBackend::new();
        backend.fail_with(BackendError::Rejected("Unauthorized".to_string()));

        let result = LoadEnvironments::new(&backend).execute(&token()).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Backend(BackendError::Rejected(m))) if m == "Unauthorized"
        ));
    }

    #[tokio::test]
    async fn test_create_environment() {
        let backend = MockBackend::new();
        let env = CreateEnvironment::new(&backend)
            .execute("staging", r#"{"base": "https://stg", "retries": 3}"#, &token())
            .await
            .unwrap();

        assert_eq!(env.name, "staging");
        assert_eq!(env.get("retries"), Some("3"));
    }

    #[tokio::test]
    async fn test_create_requires_both_fields() {
        let backend = MockBackend::new();
        let create = CreateEnvironment::new(&backend);

        assert!(matches!(
            create.execute("", "{}", &token()).await,
            Err(ApplicationError::IncompleteEnvironment)
        ));
        assert!(matches!(
            create.execute("dev", " ", &token()).await,
            Err(ApplicationError::IncompleteEnvironment)
        ));
        assert!(matches!(
            create.execute("dev", "base=x", &token()).await,
            Err(ApplicationError::InvalidVariables)
        ));
    }
}
