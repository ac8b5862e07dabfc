//! Repository layer for data access.

pub mod entities;
mod address_repository;
mod credential_repository;
mod user_repository;
mod verification_token_repository;

pub use address_repository::{AddressRepository, AddressStore};
pub use credential_repository::{CredentialRepository, CredentialStore};
pub use user_repository::{UserRepository, UserStore};
pub use verification_token_repository::{VerificationTokenRepository, VerificationTokenStore};

use common::{AppError, LookupKey};
use sea_orm::DbErr;

#[cfg(any(test, feature = "test-utils"))]
pub use address_repository::MockAddressRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use credential_repository::MockCredentialRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use verification_token_repository::MockVerificationTokenRepository;

/// Map a save that updated no row to the aggregate's lookup miss.
///
/// Saving an aggregate that carries an id issues an UPDATE, which matches
/// nothing when the row is gone.
pub(crate) fn missing_row(
    err: DbErr,
    id: Option<i32>,
    not_found: fn(LookupKey) -> AppError,
) -> AppError {
    match (err, id) {
        (DbErr::RecordNotUpdated, Some(id)) => not_found(LookupKey::Id(id)),
        (err, _) => AppError::Database(err),
    }
}
