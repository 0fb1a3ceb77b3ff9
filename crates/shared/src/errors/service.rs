use crate::errors::repository::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("{0}")]
    NotFound(String),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Turns a missing row into a not-found carrying the entity's message.
    pub fn from_repo(err: RepositoryError, not_found: &str) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound(not_found.to_string()),
            other => ServiceError::Repo(other),
        }
    }

    /// A lookup that matched no row. Callers expect these, so they are not
    /// reported as failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::NotFound(_) | ServiceError::Repo(RepositoryError::NotFound)
        )
    }
}
