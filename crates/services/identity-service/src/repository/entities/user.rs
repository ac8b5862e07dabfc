//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::relationship;
use domain::{Address, Credential, DomainError, User};

use super::{address, credential};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::credential::Entity")]
    Credential,
    #[sea_orm(has_many = "super::address::Entity")]
    Address,
}

impl Related<super::credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credential.def()
    }
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to a user without relationships
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            user_id: Some(model.user_id),
            first_name: model.first_name,
            last_name: model.last_name,
            image_url: model.image_url,
            email: model.email,
            phone: model.phone,
            credential: None,
            addresses: Vec::new(),
        }
    }
}

/// Insert when the user has no identity yet, update otherwise
impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        ActiveModel {
            user_id: user.user_id.map_or(NotSet, Set),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            image_url: Set(user.image_url.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
        }
    }
}

/// Build the user aggregate from its row and the rows it owns.
pub fn assemble(
    model: Model,
    credential: Option<credential::Model>,
    addresses: Vec<address::Model>,
) -> Result<User, DomainError> {
    let credential = credential.map(Credential::try_from).transpose()?;

    Ok(relationship::link_user(User {
        credential: credential.map(Box::new),
        addresses: addresses.into_iter().map(Address::from).collect(),
        ..User::from(model)
    }))
}
