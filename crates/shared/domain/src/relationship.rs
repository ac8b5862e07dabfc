//! Relationship coordination between aggregates.
//!
//! Back-references are index-based: owned aggregates point at their owner
//! through a foreign key field. The only object back-link is the
//! User<->Credential pair built from a credential payload, where the user
//! receives a detached copy of the credential.
//!
//! Removal planning decides which dependents must go together with a
//! primary aggregate. Executing the plan is left to the caller.

use std::fmt;

use crate::address::Address;
use crate::constants::{
    ADDRESS_AGGREGATE, CREDENTIAL_AGGREGATE, USER_AGGREGATE, VERIFICATION_TOKEN_AGGREGATE,
};
use crate::credential::Credential;
use crate::error::{DomainError, DomainResult};
use crate::user::{User, UserDto};
use crate::verification_token::VerificationToken;

// =============================================================================
// Back-reference linking
// =============================================================================

/// Point the user's credential and addresses back at the user.
///
/// Owned aggregates keep an empty `user` slot; the foreign key is the link.
pub fn link_user(mut user: User) -> User {
    let user_id = user.user_id;
    if let Some(credential) = user.credential.as_mut() {
        credential.user_id = user_id;
        credential.user = None;
    }
    for address in &mut user.addresses {
        address.user_id = user_id;
        address.user = None;
    }
    user
}

/// Set the credential's owner key and place a detached copy of the
/// credential into the owning user's credential slot.
///
/// A credential without a user keeps whatever owner key it already has.
pub fn link_credential(mut credential: Credential) -> Credential {
    let Some(mut user) = credential.user.take() else {
        return credential;
    };

    credential.user_id = user.user_id;
    user.credential = Some(Box::new(credential.detached()));
    credential.user = Some(user);
    credential
}

/// Set the address's owner key from the nested user, if any.
pub fn link_address(mut address: Address) -> Address {
    if let Some(user) = address.user.as_deref() {
        address.user_id = user.user_id;
    }
    address
}

/// Set the token's credential key from the nested credential, if any.
pub fn link_verification_token(mut token: VerificationToken) -> VerificationToken {
    if let Some(credential) = token.credential.as_deref() {
        token.credential_id = credential.credential_id;
    }
    token
}

/// Check that a user patch names no credential other than the one the user
/// already owns.
///
/// A replacement credential without identity is accepted: it is written over
/// the owned row.
pub fn ensure_owned_credential(existing: &User, incoming: &UserDto) -> DomainResult<()> {
    let Some(requested) = incoming
        .credential_dto
        .as_deref()
        .and_then(|credential| credential.credential_id)
    else {
        return Ok(());
    };

    let owned = existing
        .credential
        .as_deref()
        .and_then(|credential| credential.credential_id);

    if owned == Some(requested) {
        Ok(())
    } else {
        Err(DomainError::ForeignCredential(requested))
    }
}

// =============================================================================
// Removal planning
// =============================================================================

/// Identity of a persisted aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKey {
    User(i32),
    Credential(i32),
    Address(i32),
    VerificationToken(i32),
}

impl AggregateKey {
    /// Aggregate type name
    pub fn kind(&self) -> &'static str {
        match self {
            AggregateKey::User(_) => USER_AGGREGATE,
            AggregateKey::Credential(_) => CREDENTIAL_AGGREGATE,
            AggregateKey::Address(_) => ADDRESS_AGGREGATE,
            AggregateKey::VerificationToken(_) => VERIFICATION_TOKEN_AGGREGATE,
        }
    }

    /// Identifier value
    pub fn id(&self) -> i32 {
        match *self {
            AggregateKey::User(id)
            | AggregateKey::Credential(id)
            | AggregateKey::Address(id)
            | AggregateKey::VerificationToken(id) => id,
        }
    }
}

impl fmt::Display for AggregateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

/// Ordered removal steps: the primary aggregate first, then its dependents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePlan {
    primary: AggregateKey,
    dependents: Vec<AggregateKey>,
}

impl CascadePlan {
    /// Aggregate whose removal was requested
    pub fn primary(&self) -> AggregateKey {
        self.primary
    }

    /// Dependents to remove after the primary, in order
    pub fn dependents(&self) -> &[AggregateKey] {
        &self.dependents
    }

    /// Whether the plan removes anything besides the primary
    pub fn cascades(&self) -> bool {
        !self.dependents.is_empty()
    }
}

/// Plan the removal of a loaded user.
///
/// The user's credential is a dependent when its owner key equals the
/// user's identity.
pub fn plan_user_removal(user: &User) -> DomainResult<CascadePlan> {
    let user_id = user
        .user_id
        .ok_or(DomainError::MissingIdentity(USER_AGGREGATE))?;

    let dependents = user
        .credential
        .as_deref()
        .filter(|credential| credential.user_id == Some(user_id))
        .and_then(|credential| credential.credential_id)
        .map(AggregateKey::Credential)
        .into_iter()
        .collect();

    Ok(CascadePlan {
        primary: AggregateKey::User(user_id),
        dependents,
    })
}

/// Plan the removal of an aggregate that owns no dependents.
///
/// Users own a credential and must be planned from the loaded aggregate
/// through [`plan_user_removal`].
pub fn plan_removal(key: AggregateKey) -> DomainResult<CascadePlan> {
    if let AggregateKey::User(_) = key {
        return Err(DomainError::GraphRequired(USER_AGGREGATE));
    }

    Ok(CascadePlan {
        primary: key,
        dependents: Vec::new(),
    })
}
