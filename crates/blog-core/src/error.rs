//! Error types shared by the domain, its ports and their callers.

use thiserror::Error;
use uuid::Uuid;

/// Failure of a blog operation.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} {id} does not exist")]
    NotFound { entity_type: &'static str, id: Uuid },

    /// A field holds a value the model does not accept.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("duplicate: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl DomainError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure reported by a storage backend.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("storage unavailable: {0}")]
    Connection(String),

    #[error("storage query failed: {0}")]
    Query(String),

    #[error("record not found")]
    NotFound,

    /// A reference or uniqueness rule of the store was violated.
    #[error("constraint violated: {0}")]
    Constraint(String),
}
