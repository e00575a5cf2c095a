use crate::application::ports::{FileStorageError, RagError};
use crate::domain::repositories::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("Class '{0}' already exists")]
    ClassExists(String),
    #[error("Class '{0}' not found")]
    ClassNotFound(String),
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Free plan is limited to {limit} documents")]
    PlanLimit { limit: usize },
    #[error("{0}")]
    Duplicate(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Storage(#[from] FileStorageError),
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Engine(#[from] RagError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
