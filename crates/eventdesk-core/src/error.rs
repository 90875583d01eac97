//! Domain-level error types.

use thiserror::Error;

use crate::ports::AuthError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("{entity_type} not found with ID: {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    /// A relationship target named in the payload does not exist.
    #[error("{entity_type} not found with ID: {id}")]
    ReferenceNotFound { entity_type: &'static str, id: i64 },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: i64) -> Self {
        Self::NotFound { entity_type, id }
    }

    pub fn missing_reference(entity_type: &'static str, id: i64) -> Self {
        Self::ReferenceNotFound { entity_type, id }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => DomainError::InvalidCredentials,
            other => DomainError::Internal(other.to_string()),
        }
    }
}
