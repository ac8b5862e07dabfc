//! Unified error handling.
//!
//! Provides a single error type for the identity services. Lookup failures
//! are distinguishable per aggregate type and carry the key that missed.

use std::fmt;

use domain::{AggregateKey, DomainError};
use thiserror::Error;

/// Key used to look an aggregate up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(i32),
    Username(String),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "id: {}", id),
            LookupKey::Username(username) => write!(f, "username: {}", username),
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("User with {0} not found")]
    UserNotFound(LookupKey),

    #[error("Credential with {0} not found")]
    CredentialNotFound(LookupKey),

    #[error("Address with {0} not found")]
    AddressNotFound(LookupKey),

    #[error("VerificationToken with {0} not found")]
    VerificationTokenNotFound(LookupKey),

    // Payload
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    // Cascade
    #[error("{primary} was removed but dependent {dependent} could not be")]
    CascadeInconsistency {
        primary: AggregateKey,
        dependent: AggregateKey,
        #[source]
        source: Box<AppError>,
    },

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UserNotFound(_) => "USER_NOT_FOUND",
            AppError::CredentialNotFound(_) => "CREDENTIAL_NOT_FOUND",
            AppError::AddressNotFound(_) => "ADDRESS_NOT_FOUND",
            AppError::VerificationTokenNotFound(_) => "VERIFICATION_TOKEN_NOT_FOUND",
            AppError::InvalidPayload(_) => "INVALID_PAYLOAD",
            AppError::CascadeInconsistency { .. } => "CASCADE_INCONSISTENCY",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this is a lookup miss for any aggregate type
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::UserNotFound(_)
                | AppError::CredentialNotFound(_)
                | AppError::AddressNotFound(_)
                | AppError::VerificationTokenNotFound(_)
        )
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::InvalidPayload(msg) => msg.clone(),

            // Hide details for internal errors
            AppError::CascadeInconsistency { .. } => {
                tracing::error!("Cascade inconsistency: {:?}", self);
                "A data consistency error occurred".to_string()
            }
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingIdentity(_) | DomainError::ForeignCredential(_) => {
                AppError::InvalidPayload(err.to_string())
            }
            DomainError::UnknownRole(_) | DomainError::GraphRequired(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        AppError::InvalidPayload(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn cascade_inconsistency(
        primary: AggregateKey,
        dependent: AggregateKey,
        source: AppError,
    ) -> Self {
        AppError::CascadeInconsistency {
            primary,
            dependent,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_carries_lookup_key() {
        let err = AppError::CredentialNotFound(LookupKey::Id(999));
        assert_eq!(err.to_string(), "Credential with id: 999 not found");
        assert!(err.is_not_found());
        assert_eq!(err.code(), "CREDENTIAL_NOT_FOUND");

        let err = AppError::UserNotFound(LookupKey::Username("nonexistent".to_string()));
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn cascade_inconsistency_keeps_source() {
        use std::error::Error as _;

        let err = AppError::cascade_inconsistency(
            AggregateKey::User(1),
            AggregateKey::Credential(1),
            AppError::internal("connection reset"),
        );
        assert_eq!(
            err.to_string(),
            "User 1 was removed but dependent Credential 1 could not be"
        );
        assert!(err.source().is_some());
        assert!(!err.is_not_found());
        assert_eq!(err.user_message(), "A data consistency error occurred");
    }

    #[test]
    fn domain_errors_convert() {
        let err = AppError::from(DomainError::MissingIdentity("User"));
        assert!(matches!(err, AppError::InvalidPayload(_)));

        let err = AppError::from(DomainError::ForeignCredential(2));
        assert!(matches!(err, AppError::InvalidPayload(_)));
        assert_eq!(err.user_message(), "Credential 2 is not owned by this user");

        let err = AppError::from(DomainError::unknown_role("ROLE_ROOT"));
        assert!(matches!(err, AppError::Internal(_)));
    }
}
