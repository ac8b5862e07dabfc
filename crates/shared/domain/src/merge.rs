//! Partial-update merging.
//!
//! A transfer object used for an update is a sparse patch: a supplied field
//! (`Some`) overwrites, an absent field (`None`) leaves the existing value
//! untouched. Identity is always kept from the existing aggregate. Nested
//! relationships are replaced wholesale when supplied and preserved when
//! absent; they are never merged field by field. A replacement owner
//! (the user of a credential or address, the credential of a token) must
//! carry its identity, otherwise it is ignored and the existing owner stays:
//! an owned aggregate never loses its owner key through a patch. A
//! replacement credential without identity takes the identity of the
//! credential it replaces.
//!
//! Merging is pure. Persisting the result is the caller's job.

use crate::address::{Address, AddressDto};
use crate::credential::{Credential, CredentialDto};
use crate::mapper::{self, VerificationTokenMapper};
use crate::relationship;
use crate::user::{User, UserDto};
use crate::verification_token::{VerificationToken, VerificationTokenDto};

/// Overwrite `target` only when `incoming` carries a value.
fn patch<T: Clone>(target: &mut Option<T>, incoming: &Option<T>) {
    if let Some(value) = incoming {
        *target = Some(value.clone());
    }
}

fn identified_user(user: Option<&UserDto>) -> Option<&UserDto> {
    user.filter(|user| user.user_id.is_some())
}

/// Merge a user patch into an existing user.
pub fn merge_user(existing: &User, incoming: &UserDto) -> User {
    let mut merged = existing.clone();

    patch(&mut merged.first_name, &incoming.first_name);
    patch(&mut merged.last_name, &incoming.last_name);
    patch(&mut merged.image_url, &incoming.image_url);
    patch(&mut merged.email, &incoming.email);
    patch(&mut merged.phone, &incoming.phone);

    if let Some(credential) = incoming.credential_dto.as_deref() {
        let mut replacement = mapper::credential::fields_to_domain(credential);
        if replacement.credential_id.is_none() {
            replacement.credential_id = merged
                .credential
                .as_deref()
                .and_then(|owned| owned.credential_id);
        }
        merged.credential = Some(Box::new(replacement));
    }
    if let Some(addresses) = incoming.address_dtos.as_deref() {
        merged.addresses = mapper::user::addresses_to_domain(Some(addresses));
    }

    relationship::link_user(merged)
}

/// Merge a credential patch into an existing credential.
pub fn merge_credential(existing: &Credential, incoming: &CredentialDto) -> Credential {
    let mut merged = existing.clone();

    patch(&mut merged.username, &incoming.username);
    patch(&mut merged.password, &incoming.password);
    patch(&mut merged.role, &incoming.role_based_authority);
    patch(&mut merged.is_enabled, &incoming.is_enabled);
    patch(&mut merged.is_account_non_expired, &incoming.is_account_non_expired);
    patch(&mut merged.is_account_non_locked, &incoming.is_account_non_locked);
    patch(
        &mut merged.is_credentials_non_expired,
        &incoming.is_credentials_non_expired,
    );

    if let Some(user) = identified_user(incoming.user_dto.as_deref()) {
        merged.user = Some(Box::new(mapper::user::fields_to_domain(user)));
    }

    relationship::link_credential(merged)
}

/// Merge an address patch into an existing address.
pub fn merge_address(existing: &Address, incoming: &AddressDto) -> Address {
    let mut merged = existing.clone();

    patch(&mut merged.full_address, &incoming.full_address);
    patch(&mut merged.postal_code, &incoming.postal_code);
    patch(&mut merged.city, &incoming.city);

    if let Some(user) = identified_user(incoming.user_dto.as_deref()) {
        merged.user = Some(Box::new(mapper::user::fields_to_domain(user)));
    }

    relationship::link_address(merged)
}

/// Merge a verification token patch into an existing token.
pub fn merge_verification_token(
    existing: &VerificationToken,
    incoming: &VerificationTokenDto,
) -> VerificationToken {
    let mut merged = existing.clone();
    let fields = VerificationTokenMapper::to_domain_minimal(incoming);

    patch(&mut merged.token, &fields.token);
    patch(&mut merged.expire_date, &fields.expire_date);

    if let Some(credential) = incoming
        .credential_dto
        .as_deref()
        .filter(|credential| credential.credential_id.is_some())
    {
        merged.credential = Some(Box::new(mapper::credential::fields_to_domain(credential)));
    }

    relationship::link_verification_token(merged)
}
