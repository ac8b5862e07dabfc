use super::{user, TransferMapper};
use crate::credential::{Credential, CredentialDto};
use crate::relationship;

/// Maps [`Credential`] <-> [`CredentialDto`], expanding the owning user.
///
/// This is the one direction that restores a back-reference: the user
/// rebuilt from a credential payload gets the credential in its own slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialMapper;

impl TransferMapper for CredentialMapper {
    type Domain = Credential;
    type Transfer = CredentialDto;

    fn to_transfer(credential: &Credential) -> CredentialDto {
        CredentialDto {
            user_dto: credential
                .user
                .as_deref()
                .map(|u| Box::new(user::fields_to_transfer(u))),
            ..fields_to_transfer(credential)
        }
    }

    fn to_domain(dto: &CredentialDto) -> Credential {
        let credential = Credential {
            user: dto
                .user_dto
                .as_deref()
                .map(|u| Box::new(user::fields_to_domain(u))),
            ..fields_to_domain(dto)
        };
        relationship::link_credential(credential)
    }
}

pub(crate) fn fields_to_transfer(credential: &Credential) -> CredentialDto {
    CredentialDto {
        credential_id: credential.credential_id,
        username: credential.username.clone(),
        password: credential.password.clone(),
        role_based_authority: credential.role,
        is_enabled: credential.is_enabled,
        is_account_non_expired: credential.is_account_non_expired,
        is_account_non_locked: credential.is_account_non_locked,
        is_credentials_non_expired: credential.is_credentials_non_expired,
        user_dto: None,
    }
}

pub(crate) fn fields_to_domain(dto: &CredentialDto) -> Credential {
    Credential {
        credential_id: dto.credential_id,
        username: dto.username.clone(),
        password: dto.password.clone(),
        role: dto.role_based_authority,
        is_enabled: dto.is_enabled,
        is_account_non_expired: dto.is_account_non_expired,
        is_account_non_locked: dto.is_account_non_locked,
        is_credentials_non_expired: dto.is_credentials_non_expired,
        user_id: None,
        user: None,
    }
}
