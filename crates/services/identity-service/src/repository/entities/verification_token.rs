//! Verification token database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::relationship;
use domain::{Credential, DomainError, VerificationToken};

use super::credential;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "verification_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub verification_token_id: i32,
    pub token: Option<String>,
    pub expire_date: Option<Date>,
    pub credential_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credential::Entity",
        from = "Column::CredentialId",
        to = "super::credential::Column::CredentialId",
        on_delete = "Cascade"
    )]
    Credential,
}

impl Related<super::credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credential.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for VerificationToken {
    fn from(model: Model) -> Self {
        VerificationToken {
            verification_token_id: Some(model.verification_token_id),
            token: model.token,
            expire_date: model.expire_date,
            credential_id: model.credential_id,
            credential: None,
        }
    }
}

impl From<&VerificationToken> for ActiveModel {
    fn from(token: &VerificationToken) -> Self {
        ActiveModel {
            verification_token_id: token.verification_token_id.map_or(NotSet, Set),
            token: Set(token.token.clone()),
            expire_date: Set(token.expire_date),
            credential_id: Set(token.credential_id),
        }
    }
}

/// Build the token aggregate with its credential, if any.
pub fn assemble(
    model: Model,
    credential: Option<credential::Model>,
) -> Result<VerificationToken, DomainError> {
    let credential = credential.map(Credential::try_from).transpose()?;

    Ok(relationship::link_verification_token(VerificationToken {
        credential: credential.map(Box::new),
        ..VerificationToken::from(model)
    }))
}
