//! Service layer - per-aggregate orchestration.
//!
//! Each service resolves aggregates through its repository, applies the
//! domain mapping, merge and cascade rules, and hands transfer objects back.

mod address_service;
mod credential_service;
mod user_service;
mod verification_token_service;

pub use address_service::{AddressManager, AddressService};
pub use credential_service::{CredentialManager, CredentialService};
pub use user_service::{UserManager, UserService};
pub use verification_token_service::{VerificationTokenManager, VerificationTokenService};
