//! Domain layer - Identity aggregates, transfer objects and the pure logic
//! that moves data between them.
//!
//! This crate has no infrastructure dependencies. It holds:
//! - the four aggregates (User, Credential, Address, VerificationToken)
//!   and their transfer representations
//! - [`mapper`]: bidirectional aggregate <-> transfer conversion
//! - [`relationship`]: back-reference linking and cascade planning
//! - [`merge`]: sparse-patch merging for partial updates

pub mod address;
pub mod constants;
pub mod credential;
pub mod error;
pub mod mapper;
pub mod merge;
pub mod relationship;
pub mod user;
pub mod verification_token;

pub use address::{Address, AddressDto};
pub use constants::*;
pub use credential::{Credential, CredentialDto, Role};
pub use error::{DomainError, DomainResult};
pub use mapper::{
    AddressMapper, CredentialMapper, TransferMapper, UserMapper, VerificationTokenMapper,
};
pub use relationship::{AggregateKey, CascadePlan};
pub use user::{User, UserDto};
pub use verification_token::{VerificationToken, VerificationTokenDto};
