//! User repository implementation.
//!
//! A user is stored across three tables: its own row, the credential row
//! pointing at it and any address rows pointing at it. Reads assemble all
//! three, saves write all three in one transaction. A saved user owns
//! exactly the addresses it carries; rows left behind are removed.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteMany, EntityTrait, LoaderTrait,
    NotSet, QueryFilter, QuerySelect, Set, TransactionTrait, TryIntoModel,
};

use super::entities::{address, credential, user};
use super::missing_row;
use common::{AppError, AppResult, LookupKey};
use domain::{DomainError, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users with their credential and addresses
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: i32) -> AppResult<Option<User>>;

    /// Find the user owning the credential with the given username
    async fn find_by_credential_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert or update the user together with its credential and addresses
    async fn save(&self, user: User) -> AppResult<User>;

    /// Delete the user row (no-op when absent)
    async fn delete_by_id(&self, user_id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn assemble(&self, models: Vec<user::Model>) -> AppResult<Vec<User>> {
        let credentials = models.load_one(credential::Entity, &self.db).await?;
        let addresses = models.load_many(address::Entity, &self.db).await?;

        models
            .into_iter()
            .zip(credentials)
            .zip(addresses)
            .map(|((model, credential), addresses)| user::assemble(model, credential, addresses))
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)
    }

    async fn assemble_one(&self, model: Option<user::Model>) -> AppResult<Option<User>> {
        match model {
            Some(model) => Ok(self.assemble(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }
}

/// Addresses of the user that are not among the ones just written
fn stale_addresses(user_id: i32, kept: Vec<i32>) -> DeleteMany<address::Entity> {
    let query = address::Entity::delete_many().filter(address::Column::UserId.eq(user_id));
    if kept.is_empty() {
        return query;
    }
    query.filter(address::Column::AddressId.is_not_in(kept))
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = user::Entity::find().all(&self.db).await?;
        self.assemble(models).await
    }

    async fn find_by_id(&self, user_id: i32) -> AppResult<Option<User>> {
        let model = user::Entity::find_by_id(user_id).one(&self.db).await?;
        self.assemble_one(model).await
    }

    async fn find_by_credential_username(&self, username: &str) -> AppResult<Option<User>> {
        let model = user::Entity::find()
            .inner_join(credential::Entity)
            .filter(credential::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        self.assemble_one(model).await
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let txn = self.db.begin().await?;

        let model = user::ActiveModel::from(&user)
            .save(&txn)
            .await
            .map_err(|err| missing_row(err, user.user_id, AppError::UserNotFound))?
            .try_into_model()?;
        let user_id = model.user_id;

        if let Some(credential) = user.credential.as_deref() {
            let owned = credential::Entity::find()
                .filter(credential::Column::UserId.eq(user_id))
                .one(&txn)
                .await?;

            let credential_id = match (credential.credential_id, owned) {
                // A replacement credential without identity takes over the owned row
                (None, owned) => owned.map(|row| row.credential_id),
                (Some(requested), Some(owned)) if owned.credential_id == requested => {
                    Some(requested)
                }
                (Some(requested), Some(_)) => {
                    return Err(DomainError::ForeignCredential(requested).into());
                }
                (Some(requested), None) => {
                    let row = credential::Entity::find_by_id(requested).one(&txn).await?;
                    if row.and_then(|row| row.user_id).is_some_and(|owner| owner != user_id) {
                        return Err(DomainError::ForeignCredential(requested).into());
                    }
                    Some(requested)
                }
            };

            let mut active = credential::ActiveModel::from(credential);
            active.credential_id = credential_id.map_or(NotSet, Set);
            active.user_id = Set(Some(user_id));
            active
                .save(&txn)
                .await
                .map_err(|err| missing_row(err, credential_id, AppError::CredentialNotFound))?;
        }

        let mut kept = Vec::with_capacity(user.addresses.len());
        for address in &user.addresses {
            let mut active = address::ActiveModel::from(address);
            active.user_id = Set(Some(user_id));
            let saved = active
                .save(&txn)
                .await
                .map_err(|err| missing_row(err, address.address_id, AppError::AddressNotFound))?
                .try_into_model()?;
            kept.push(saved.address_id);
        }

        let removed = stale_addresses(user_id, kept).exec(&txn).await?;

        txn.commit().await?;
        tracing::debug!(
            user_id,
            addresses_removed = removed.rows_affected,
            "User rows written"
        );

        self.find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound(LookupKey::Id(user_id)))
    }

    async fn delete_by_id(&self, user_id: i32) -> AppResult<()> {
        let result = user::Entity::delete_by_id(user_id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            tracing::debug!(user_id, "No user row to delete");
        }

        Ok(())
    }
}
