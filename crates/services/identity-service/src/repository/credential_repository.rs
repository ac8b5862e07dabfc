//! Credential repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TryIntoModel,
};

use super::entities::{credential, user};
use super::missing_row;
use common::{AppError, AppResult, LookupKey};
use domain::Credential;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Credential repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// List all credentials with their owning user
    async fn find_all(&self) -> AppResult<Vec<Credential>>;

    /// Find credential by ID
    async fn find_by_id(&self, credential_id: i32) -> AppResult<Option<Credential>>;

    /// Find credential by its unique username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>>;

    /// Insert or update the credential row
    async fn save(&self, credential: Credential) -> AppResult<Credential>;

    /// Delete the credential row (no-op when absent)
    async fn delete_by_id(&self, credential_id: i32) -> AppResult<()>;

    /// Delete the credential row, failing when it does not exist
    async fn delete_by_credential_id(&self, credential_id: i32) -> AppResult<()>;
}

/// Concrete implementation of CredentialRepository
pub struct CredentialStore {
    db: DatabaseConnection,
}

impl CredentialStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn assemble_all(rows: Vec<(credential::Model, Option<user::Model>)>) -> AppResult<Vec<Credential>> {
    rows.into_iter()
        .map(|(model, user)| credential::assemble(model, user))
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::from)
}

#[async_trait]
impl CredentialRepository for CredentialStore {
    async fn find_all(&self) -> AppResult<Vec<Credential>> {
        let rows = credential::Entity::find()
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;

        assemble_all(rows)
    }

    async fn find_by_id(&self, credential_id: i32) -> AppResult<Option<Credential>> {
        let row = credential::Entity::find_by_id(credential_id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        Ok(assemble_all(row.into_iter().collect())?.pop())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>> {
        let row = credential::Entity::find()
            .filter(credential::Column::Username.eq(username))
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        Ok(assemble_all(row.into_iter().collect())?.pop())
    }

    async fn save(&self, credential: Credential) -> AppResult<Credential> {
        let model = credential::ActiveModel::from(&credential)
            .save(&self.db)
            .await
            .map_err(|err| {
                missing_row(err, credential.credential_id, AppError::CredentialNotFound)
            })?
            .try_into_model()?;
        let credential_id = model.credential_id;

        self.find_by_id(credential_id)
            .await?
            .ok_or(AppError::CredentialNotFound(LookupKey::Id(credential_id)))
    }

    async fn delete_by_id(&self, credential_id: i32) -> AppResult<()> {
        let result = credential::Entity::delete_by_id(credential_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            tracing::debug!(credential_id, "No credential row to delete");
        }

        Ok(())
    }

    async fn delete_by_credential_id(&self, credential_id: i32) -> AppResult<()> {
        let result = credential::Entity::delete_by_id(credential_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::CredentialNotFound(LookupKey::Id(credential_id)));
        }

        Ok(())
    }
}
