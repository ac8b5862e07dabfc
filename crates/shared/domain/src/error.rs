//! Domain-level errors.
//!
//! These errors represent failures of the pure mapping and relationship
//! logic. They are independent of infrastructure concerns (storage, transport).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A stored role string is not part of the role vocabulary
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// An operation needed an identity the aggregate does not carry yet
    #[error("{0} has no identity assigned")]
    MissingIdentity(&'static str),

    /// Removal planning needs the loaded aggregate, not just its key
    #[error("{0} removal must be planned from the loaded aggregate")]
    GraphRequired(&'static str),

    /// A user payload names a credential the user does not own
    #[error("Credential {0} is not owned by this user")]
    ForeignCredential(i32),
}

impl DomainError {
    /// Create an unknown role error
    pub fn unknown_role(role: impl Into<String>) -> Self {
        DomainError::UnknownRole(role.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
