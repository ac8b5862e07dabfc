//! Address database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::relationship;
use domain::{Address, User};

use super::user;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub address_id: i32,
    pub full_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Address {
    fn from(model: Model) -> Self {
        Address {
            address_id: Some(model.address_id),
            full_address: model.full_address,
            postal_code: model.postal_code,
            city: model.city,
            user_id: model.user_id,
            user: None,
        }
    }
}

impl From<&Address> for ActiveModel {
    fn from(address: &Address) -> Self {
        ActiveModel {
            address_id: address.address_id.map_or(NotSet, Set),
            full_address: Set(address.full_address.clone()),
            postal_code: Set(address.postal_code.clone()),
            city: Set(address.city.clone()),
            user_id: Set(address.user_id),
        }
    }
}

/// Build the address aggregate with its owning user, if any.
pub fn assemble(model: Model, user: Option<user::Model>) -> Address {
    relationship::link_address(Address {
        user: user.map(|user| Box::new(User::from(user))),
        ..Address::from(model)
    })
}
