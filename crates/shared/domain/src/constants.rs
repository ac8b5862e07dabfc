//! Domain-level constants.
//!
//! These constants define the wire and storage vocabulary of the identity
//! aggregates.

// =============================================================================
// Roles
// =============================================================================

/// Default authority granted to regular accounts
pub const ROLE_USER: &str = "ROLE_USER";

/// Administrator authority
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

// =============================================================================
// Aggregate names
// =============================================================================

pub const USER_AGGREGATE: &str = "User";
pub const CREDENTIAL_AGGREGATE: &str = "Credential";
pub const ADDRESS_AGGREGATE: &str = "Address";
pub const VERIFICATION_TOKEN_AGGREGATE: &str = "VerificationToken";
