//! Credential database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::relationship;
use domain::{Credential, DomainError, Role, User};

use super::user;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credentials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub credential_id: i32,
    #[sea_orm(unique)]
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub is_enabled: Option<bool>,
    pub is_account_non_expired: Option<bool>,
    pub is_account_non_locked: Option<bool>,
    pub is_credentials_non_expired: Option<bool>,
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::verification_token::Entity")]
    VerificationToken,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::verification_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VerificationToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to a credential without its user.
///
/// Fails when the stored role is outside the role vocabulary.
impl TryFrom<Model> for Credential {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role = model
            .role
            .as_deref()
            .map(str::parse::<Role>)
            .transpose()?;

        Ok(Credential {
            credential_id: Some(model.credential_id),
            username: model.username,
            password: model.password,
            role,
            is_enabled: model.is_enabled,
            is_account_non_expired: model.is_account_non_expired,
            is_account_non_locked: model.is_account_non_locked,
            is_credentials_non_expired: model.is_credentials_non_expired,
            user_id: model.user_id,
            user: None,
        })
    }
}

impl From<&Credential> for ActiveModel {
    fn from(credential: &Credential) -> Self {
        ActiveModel {
            credential_id: credential.credential_id.map_or(NotSet, Set),
            username: Set(credential.username.clone()),
            password: Set(credential.password.clone()),
            role: Set(credential.role.map(|role| role.as_str().to_string())),
            is_enabled: Set(credential.is_enabled),
            is_account_non_expired: Set(credential.is_account_non_expired),
            is_account_non_locked: Set(credential.is_account_non_locked),
            is_credentials_non_expired: Set(credential.is_credentials_non_expired),
            user_id: Set(credential.user_id),
        }
    }
}

/// Build the credential aggregate with its owning user, if any.
pub fn assemble(model: Model, user: Option<user::Model>) -> Result<Credential, DomainError> {
    let credential = Credential::try_from(model)?;

    Ok(relationship::link_credential(Credential {
        user: user.map(|user| Box::new(User::from(user))),
        ..credential
    }))
}
