//! Address repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, TryIntoModel};

use super::entities::{address, user};
use super::missing_row;
use common::{AppError, AppResult, LookupKey};
use domain::Address;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Address repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// List all addresses with their owning user
    async fn find_all(&self) -> AppResult<Vec<Address>>;

    /// Find address by ID
    async fn find_by_id(&self, address_id: i32) -> AppResult<Option<Address>>;

    /// Insert or update the address row
    async fn save(&self, address: Address) -> AppResult<Address>;

    /// Delete the address row (no-op when absent)
    async fn delete_by_id(&self, address_id: i32) -> AppResult<()>;
}

/// Concrete implementation of AddressRepository
pub struct AddressStore {
    db: DatabaseConnection,
}

impl AddressStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressRepository for AddressStore {
    async fn find_all(&self) -> AppResult<Vec<Address>> {
        let rows = address::Entity::find()
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, user)| address::assemble(model, user))
            .collect())
    }

    async fn find_by_id(&self, address_id: i32) -> AppResult<Option<Address>> {
        let row = address::Entity::find_by_id(address_id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(model, user)| address::assemble(model, user)))
    }

    async fn save(&self, address: Address) -> AppResult<Address> {
        let model = address::ActiveModel::from(&address)
            .save(&self.db)
            .await
            .map_err(|err| missing_row(err, address.address_id, AppError::AddressNotFound))?
            .try_into_model()?;
        let address_id = model.address_id;

        self.find_by_id(address_id)
            .await?
            .ok_or(AppError::AddressNotFound(LookupKey::Id(address_id)))
    }

    async fn delete_by_id(&self, address_id: i32) -> AppResult<()> {
        let result = address::Entity::delete_by_id(address_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            tracing::debug!(address_id, "No address row to delete");
        }

        Ok(())
    }
}
