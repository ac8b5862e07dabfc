use super::{credential, TransferMapper};
use crate::relationship;
use crate::verification_token::{VerificationToken, VerificationTokenDto};

/// Maps [`VerificationToken`] <-> [`VerificationTokenDto`], expanding the
/// issuing credential (without its user).
#[derive(Debug, Clone, Copy, Default)]
pub struct VerificationTokenMapper;

impl TransferMapper for VerificationTokenMapper {
    type Domain = VerificationToken;
    type Transfer = VerificationTokenDto;

    fn to_transfer(token: &VerificationToken) -> VerificationTokenDto {
        VerificationTokenDto {
            credential_dto: token
                .credential
                .as_deref()
                .map(|c| Box::new(credential::fields_to_transfer(c))),
            ..Self::to_transfer_minimal(token)
        }
    }

    fn to_domain(dto: &VerificationTokenDto) -> VerificationToken {
        let token = VerificationToken {
            credential: dto
                .credential_dto
                .as_deref()
                .map(|c| Box::new(credential::fields_to_domain(c))),
            ..Self::to_domain_minimal(dto)
        };
        relationship::link_verification_token(token)
    }
}

impl VerificationTokenMapper {
    /// Token fields only; the credential is explicitly absent.
    pub fn to_transfer_minimal(token: &VerificationToken) -> VerificationTokenDto {
        VerificationTokenDto {
            verification_token_id: token.verification_token_id,
            token: token.token.clone(),
            expire_date: token.expire_date,
            credential_dto: None,
        }
    }

    /// Token fields only; the credential and its key are explicitly absent.
    pub fn to_domain_minimal(dto: &VerificationTokenDto) -> VerificationToken {
        VerificationToken {
            verification_token_id: dto.verification_token_id,
            token: dto.token.clone(),
            expire_date: dto.expire_date,
            credential_id: None,
            credential: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::credential::CredentialDto;

    fn token_dto() -> VerificationTokenDto {
        VerificationTokenDto {
            verification_token_id: Some(1),
            token: Some("abc123token".to_string()),
            expire_date: NaiveDate::from_ymd_opt(2030, 1, 15),
            credential_dto: Some(Box::new(CredentialDto {
                credential_id: Some(6),
                username: Some("testuser".to_string()),
                ..Default::default()
            })),
        }
    }

    #[test]
    fn to_domain_links_credential_key() {
        let token = VerificationTokenMapper::to_domain(&token_dto());

        assert_eq!(token.credential_id, Some(6));
        let credential = token.credential.as_deref().unwrap();
        assert_eq!(credential.username.as_deref(), Some("testuser"));
        assert!(credential.user.is_none());
    }

    #[test]
    fn full_mapping_round_trips() {
        let token = VerificationTokenMapper::to_domain(&token_dto());
        assert_eq!(VerificationTokenMapper::to_transfer(&token), token_dto());
    }

    #[test]
    fn minimal_mapping_drops_credential() {
        let token = VerificationTokenMapper::to_domain_minimal(&token_dto());
        assert_eq!(token.token.as_deref(), Some("abc123token"));
        assert_eq!(token.expire_date, NaiveDate::from_ymd_opt(2030, 1, 15));
        assert!(token.credential.is_none());
        assert!(token.credential_id.is_none());

        let full = VerificationTokenMapper::to_domain(&token_dto());
        let dto = VerificationTokenMapper::to_transfer_minimal(&full);
        assert!(dto.credential_dto.is_none());
        assert_eq!(dto.verification_token_id, Some(1));
    }
}
