//! Verification token service - Handles verification token use cases.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use common::{AppError, AppResult, LookupKey};
use domain::merge;
use domain::relationship;
use domain::{
    AggregateKey, TransferMapper, VerificationToken, VerificationTokenDto,
    VerificationTokenMapper,
};

use crate::repository::VerificationTokenRepository;

/// Verification token service trait for dependency injection.
#[async_trait]
pub trait VerificationTokenService: Send + Sync {
    /// List all tokens
    async fn find_all(&self) -> AppResult<Vec<VerificationTokenDto>>;

    /// Get token by ID
    async fn find_by_id(&self, verification_token_id: i32) -> AppResult<VerificationTokenDto>;

    /// Create a token from a transfer object
    async fn save(&self, token_dto: VerificationTokenDto) -> AppResult<VerificationTokenDto>;

    /// Partially update the token identified by the payload itself
    async fn update(
        &self,
        token_dto: Option<VerificationTokenDto>,
    ) -> AppResult<VerificationTokenDto>;

    /// Partially update the token with the given ID
    async fn update_by_id(
        &self,
        verification_token_id: i32,
        token_dto: Option<VerificationTokenDto>,
    ) -> AppResult<VerificationTokenDto>;

    /// Delete token
    async fn delete_by_id(&self, verification_token_id: i32) -> AppResult<()>;
}

/// Concrete implementation of VerificationTokenService using repository.
pub struct VerificationTokenManager {
    repo: Arc<dyn VerificationTokenRepository>,
}

impl VerificationTokenManager {
    /// Create new token service instance with repository
    pub fn new(repo: Arc<dyn VerificationTokenRepository>) -> Self {
        Self { repo }
    }

    async fn fetch(&self, verification_token_id: i32) -> AppResult<VerificationToken> {
        self.repo
            .find_by_id(verification_token_id)
            .await?
            .ok_or(AppError::VerificationTokenNotFound(LookupKey::Id(
                verification_token_id,
            )))
    }
}

#[async_trait]
impl VerificationTokenService for VerificationTokenManager {
    async fn find_all(&self) -> AppResult<Vec<VerificationTokenDto>> {
        debug!("Fetching all verification tokens");
        let tokens = self.repo.find_all().await?;
        Ok(VerificationTokenMapper::to_transfer_all(&tokens))
    }

    async fn find_by_id(&self, verification_token_id: i32) -> AppResult<VerificationTokenDto> {
        debug!(verification_token_id, "Fetching verification token by id");
        let token = self.fetch(verification_token_id).await?;
        Ok(VerificationTokenMapper::to_transfer(&token))
    }

    async fn save(&self, token_dto: VerificationTokenDto) -> AppResult<VerificationTokenDto> {
        debug!("Saving verification token");
        let saved = self
            .repo
            .save(VerificationTokenMapper::to_domain(&token_dto))
            .await?;
        info!(
            verification_token_id = ?saved.verification_token_id,
            "Verification token saved"
        );
        Ok(VerificationTokenMapper::to_transfer(&saved))
    }

    async fn update(
        &self,
        token_dto: Option<VerificationTokenDto>,
    ) -> AppResult<VerificationTokenDto> {
        let token_dto = token_dto
            .ok_or_else(|| AppError::invalid_payload("VerificationToken payload is required"))?;
        let verification_token_id = token_dto.verification_token_id.ok_or_else(|| {
            AppError::invalid_payload("VerificationToken payload carries no verificationTokenId")
        })?;

        self.update_by_id(verification_token_id, Some(token_dto))
            .await
    }

    async fn update_by_id(
        &self,
        verification_token_id: i32,
        token_dto: Option<VerificationTokenDto>,
    ) -> AppResult<VerificationTokenDto> {
        let token_dto = token_dto
            .ok_or_else(|| AppError::invalid_payload("VerificationToken payload is required"))?;
        debug!(verification_token_id, "Updating verification token");

        let existing = self.fetch(verification_token_id).await?;
        let merged = merge::merge_verification_token(&existing, &token_dto);
        let saved = self.repo.save(merged).await?;

        info!(verification_token_id, "Verification token updated");
        Ok(VerificationTokenMapper::to_transfer(&saved))
    }

    async fn delete_by_id(&self, verification_token_id: i32) -> AppResult<()> {
        debug!(verification_token_id, "Deleting verification token");
        let plan =
            relationship::plan_removal(AggregateKey::VerificationToken(verification_token_id))?;

        self.repo.delete_by_id(plan.primary().id()).await?;

        info!(verification_token_id, "Verification token deleted");
        Ok(())
    }
}
