//! Verification token repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, TryIntoModel};

use super::entities::{credential, verification_token};
use super::missing_row;
use common::{AppError, AppResult, LookupKey};
use domain::VerificationToken;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Verification token repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    /// List all tokens with their credential
    async fn find_all(&self) -> AppResult<Vec<VerificationToken>>;

    /// Find token by ID
    async fn find_by_id(&self, verification_token_id: i32) -> AppResult<Option<VerificationToken>>;

    /// Insert or update the token row
    async fn save(&self, token: VerificationToken) -> AppResult<VerificationToken>;

    /// Delete the token row (no-op when absent)
    async fn delete_by_id(&self, verification_token_id: i32) -> AppResult<()>;
}

/// Concrete implementation of VerificationTokenRepository
pub struct VerificationTokenStore {
    db: DatabaseConnection,
}

impl VerificationTokenStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VerificationTokenRepository for VerificationTokenStore {
    async fn find_all(&self) -> AppResult<Vec<VerificationToken>> {
        let rows = verification_token::Entity::find()
            .find_also_related(credential::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(model, credential)| verification_token::assemble(model, credential))
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, verification_token_id: i32) -> AppResult<Option<VerificationToken>> {
        let row = verification_token::Entity::find_by_id(verification_token_id)
            .find_also_related(credential::Entity)
            .one(&self.db)
            .await?;

        row.map(|(model, credential)| verification_token::assemble(model, credential))
            .transpose()
            .map_err(AppError::from)
    }

    async fn save(&self, token: VerificationToken) -> AppResult<VerificationToken> {
        let model = verification_token::ActiveModel::from(&token)
            .save(&self.db)
            .await
            .map_err(|err| {
                missing_row(
                    err,
                    token.verification_token_id,
                    AppError::VerificationTokenNotFound,
                )
            })?
            .try_into_model()?;
        let verification_token_id = model.verification_token_id;

        self.find_by_id(verification_token_id)
            .await?
            .ok_or(AppError::VerificationTokenNotFound(LookupKey::Id(
                verification_token_id,
            )))
    }

    async fn delete_by_id(&self, verification_token_id: i32) -> AppResult<()> {
        let result = verification_token::Entity::delete_by_id(verification_token_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            tracing::debug!(verification_token_id, "No verification token row to delete");
        }

        Ok(())
    }
}
