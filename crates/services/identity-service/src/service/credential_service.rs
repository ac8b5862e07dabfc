//! Credential service - Handles credential use cases.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use common::{AppError, AppResult, LookupKey};
use domain::merge;
use domain::relationship;
use domain::{AggregateKey, Credential, CredentialDto, CredentialMapper, TransferMapper};

use crate::repository::CredentialRepository;

/// Credential service trait for dependency injection.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// List all credentials
    async fn find_all(&self) -> AppResult<Vec<CredentialDto>>;

    /// Get credential by ID
    async fn find_by_id(&self, credential_id: i32) -> AppResult<CredentialDto>;

    /// Get credential by username
    async fn find_by_username(&self, username: &str) -> AppResult<CredentialDto>;

    /// Create a credential from a transfer object
    async fn save(&self, credential_dto: CredentialDto) -> AppResult<CredentialDto>;

    /// Partially update the credential identified by the payload itself
    async fn update(&self, credential_dto: Option<CredentialDto>) -> AppResult<CredentialDto>;

    /// Partially update the credential with the given ID
    async fn update_by_id(
        &self,
        credential_id: i32,
        credential_dto: Option<CredentialDto>,
    ) -> AppResult<CredentialDto>;

    /// Delete credential
    async fn delete_by_id(&self, credential_id: i32) -> AppResult<()>;
}

/// Concrete implementation of CredentialService using repository.
pub struct CredentialManager {
    repo: Arc<dyn CredentialRepository>,
}

impl CredentialManager {
    /// Create new credential service instance with repository
    pub fn new(repo: Arc<dyn CredentialRepository>) -> Self {
        Self { repo }
    }

    async fn fetch(&self, credential_id: i32) -> AppResult<Credential> {
        self.repo
            .find_by_id(credential_id)
            .await?
            .ok_or(AppError::CredentialNotFound(LookupKey::Id(credential_id)))
    }
}

#[async_trait]
impl CredentialService for CredentialManager {
    async fn find_all(&self) -> AppResult<Vec<CredentialDto>> {
        debug!("Fetching all credentials");
        let credentials = self.repo.find_all().await?;
        Ok(CredentialMapper::to_transfer_all(&credentials))
    }

    async fn find_by_id(&self, credential_id: i32) -> AppResult<CredentialDto> {
        debug!(credential_id, "Fetching credential by id");
        let credential = self.fetch(credential_id).await?;
        Ok(CredentialMapper::to_transfer(&credential))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<CredentialDto> {
        debug!(username, "Fetching credential by username");
        let credential = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::CredentialNotFound(LookupKey::Username(username.to_string()))
            })?;
        Ok(CredentialMapper::to_transfer(&credential))
    }

    async fn save(&self, credential_dto: CredentialDto) -> AppResult<CredentialDto> {
        debug!("Saving credential");
        let saved = self
            .repo
            .save(CredentialMapper::to_domain(&credential_dto))
            .await?;
        info!(credential_id = ?saved.credential_id, "Credential saved");
        Ok(CredentialMapper::to_transfer(&saved))
    }

    async fn update(&self, credential_dto: Option<CredentialDto>) -> AppResult<CredentialDto> {
        let credential_dto = credential_dto
            .ok_or_else(|| AppError::invalid_payload("Credential payload is required"))?;
        let credential_id = credential_dto
            .credential_id
            .ok_or_else(|| AppError::invalid_payload("Credential payload carries no credentialId"))?;

        self.update_by_id(credential_id, Some(credential_dto)).await
    }

    async fn update_by_id(
        &self,
        credential_id: i32,
        credential_dto: Option<CredentialDto>,
    ) -> AppResult<CredentialDto> {
        let credential_dto = credential_dto
            .ok_or_else(|| AppError::invalid_payload("Credential payload is required"))?;
        debug!(credential_id, "Updating credential");

        let existing = self.fetch(credential_id).await?;
        let merged = merge::merge_credential(&existing, &credential_dto);
        let saved = self.repo.save(merged).await?;

        info!(credential_id, "Credential updated");
        Ok(CredentialMapper::to_transfer(&saved))
    }

    async fn delete_by_id(&self, credential_id: i32) -> AppResult<()> {
        debug!(credential_id, "Deleting credential");
        let plan = relationship::plan_removal(AggregateKey::Credential(credential_id))?;

        self.repo.delete_by_id(plan.primary().id()).await?;

        info!(credential_id, "Credential deleted");
        Ok(())
    }
}
