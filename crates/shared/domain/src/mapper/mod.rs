//! Bidirectional conversion between aggregates and transfer objects.
//!
//! Mappers are stateless unit structs. Absence maps to absence in both
//! directions: a missing nested relationship never turns into an empty or
//! default nested object. Nested aggregates are expanded one level deep with
//! their own fields only, which keeps every mapping acyclic.

pub(crate) mod address;
pub(crate) mod credential;
pub(crate) mod user;
pub(crate) mod verification_token;

pub use address::AddressMapper;
pub use credential::CredentialMapper;
pub use user::UserMapper;
pub use verification_token::VerificationTokenMapper;

/// Conversion contract shared by all aggregate mappers.
pub trait TransferMapper {
    /// Aggregate type
    type Domain;
    /// Transfer representation
    type Transfer;

    /// Map an aggregate to its transfer representation
    fn to_transfer(domain: &Self::Domain) -> Self::Transfer;

    /// Map a transfer object to an aggregate, restoring back-references
    fn to_domain(transfer: &Self::Transfer) -> Self::Domain;

    /// Absence-preserving variant of [`TransferMapper::to_transfer`]
    fn to_transfer_opt(domain: Option<&Self::Domain>) -> Option<Self::Transfer> {
        domain.map(Self::to_transfer)
    }

    /// Absence-preserving variant of [`TransferMapper::to_domain`]
    fn to_domain_opt(transfer: Option<&Self::Transfer>) -> Option<Self::Domain> {
        transfer.map(Self::to_domain)
    }

    /// Map a list of aggregates in order
    fn to_transfer_all(domains: &[Self::Domain]) -> Vec<Self::Transfer> {
        domains.iter().map(Self::to_transfer).collect()
    }
}
