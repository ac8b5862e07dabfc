//! Address service - Handles address use cases.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use common::{AppError, AppResult, LookupKey};
use domain::merge;
use domain::relationship;
use domain::{Address, AddressDto, AddressMapper, AggregateKey, TransferMapper};

use crate::repository::AddressRepository;

/// Address service trait for dependency injection.
#[async_trait]
pub trait AddressService: Send + Sync {
    /// List all addresses
    async fn find_all(&self) -> AppResult<Vec<AddressDto>>;

    /// Get address by ID
    async fn find_by_id(&self, address_id: i32) -> AppResult<AddressDto>;

    /// Create an address from a transfer object
    async fn save(&self, address_dto: AddressDto) -> AppResult<AddressDto>;

    /// Partially update the address identified by the payload itself
    async fn update(&self, address_dto: Option<AddressDto>) -> AppResult<AddressDto>;

    /// Partially update the address with the given ID
    async fn update_by_id(
        &self,
        address_id: i32,
        address_dto: Option<AddressDto>,
    ) -> AppResult<AddressDto>;

    /// Delete address
    async fn delete_by_id(&self, address_id: i32) -> AppResult<()>;
}

/// Concrete implementation of AddressService using repository.
pub struct AddressManager {
    repo: Arc<dyn AddressRepository>,
}

impl AddressManager {
    /// Create new address service instance with repository
    pub fn new(repo: Arc<dyn AddressRepository>) -> Self {
        Self { repo }
    }

    async fn fetch(&self, address_id: i32) -> AppResult<Address> {
        self.repo
            .find_by_id(address_id)
            .await?
            .ok_or(AppError::AddressNotFound(LookupKey::Id(address_id)))
    }
}

#[async_trait]
impl AddressService for AddressManager {
    async fn find_all(&self) -> AppResult<Vec<AddressDto>> {
        debug!("Fetching all addresses");
        let addresses = self.repo.find_all().await?;
        Ok(AddressMapper::to_transfer_all(&addresses))
    }

    async fn find_by_id(&self, address_id: i32) -> AppResult<AddressDto> {
        debug!(address_id, "Fetching address by id");
        let address = self.fetch(address_id).await?;
        Ok(AddressMapper::to_transfer(&address))
    }

    async fn save(&self, address_dto: AddressDto) -> AppResult<AddressDto> {
        debug!("Saving address");
        let saved = self.repo.save(AddressMapper::to_domain(&address_dto)).await?;
        info!(address_id = ?saved.address_id, "Address saved");
        Ok(AddressMapper::to_transfer(&saved))
    }

    async fn update(&self, address_dto: Option<AddressDto>) -> AppResult<AddressDto> {
        let address_dto =
            address_dto.ok_or_else(|| AppError::invalid_payload("Address payload is required"))?;
        let address_id = address_dto
            .address_id
            .ok_or_else(|| AppError::invalid_payload("Address payload carries no addressId"))?;

        self.update_by_id(address_id, Some(address_dto)).await
    }

    async fn update_by_id(
        &self,
        address_id: i32,
        address_dto: Option<AddressDto>,
    ) -> AppResult<AddressDto> {
        let address_dto =
            address_dto.ok_or_else(|| AppError::invalid_payload("Address payload is required"))?;
        debug!(address_id, "Updating address");

        let existing = self.fetch(address_id).await?;
        let merged = merge::merge_address(&existing, &address_dto);
        let saved = self.repo.save(merged).await?;

        info!(address_id, "Address updated");
        Ok(AddressMapper::to_transfer(&saved))
    }

    async fn delete_by_id(&self, address_id: i32) -> AppResult<()> {
        debug!(address_id, "Deleting address");
        let plan = relationship::plan_removal(AggregateKey::Address(address_id))?;

        self.repo.delete_by_id(plan.primary().id()).await?;

        info!(address_id, "Address deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::MockAddressRepository;
    use domain::User;

    fn stored_address() -> Address {
        relationship::link_address(Address {
            address_id: Some(1),
            full_address: Some("123 Main St".to_string()),
            postal_code: Some("12345".to_string()),
            city: Some("New York".to_string()),
            user: Some(Box::new(User {
                user_id: Some(1),
                first_name: Some("John".to_string()),
                ..Default::default()
            })),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_update_with_null_fields_keeps_existing_values() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(Some(stored_address())));
        repo.expect_save()
            .withf(|address| {
                address.full_address.as_deref() == Some("123 Main St")
                    && address.city.as_deref() == Some("New York")
                    && address.user_id == Some(1)
            })
            .times(1)
            .returning(Ok);

        let service = AddressManager::new(Arc::new(repo));
        let dto = service
            .update_by_id(
                1,
                Some(AddressDto {
                    full_address: None,
                    city: None,
                    ..Default::default()
                }),
            )
            .await
            .unwrap();

        assert_eq!(dto.full_address.as_deref(), Some("123 Main St"));
        assert_eq!(dto.postal_code.as_deref(), Some("12345"));
        assert_eq!(dto.user_dto.and_then(|u| u.user_id), Some(1));
    }

    #[tokio::test]
    async fn test_update_by_id_ignores_payload_identity() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(stored_address())));
        repo.expect_save()
            .withf(|address| address.address_id == Some(1))
            .times(1)
            .returning(Ok);

        let service = AddressManager::new(Arc::new(repo));
        let dto = service
            .update_by_id(
                1,
                Some(AddressDto {
                    address_id: Some(2),
                    city: Some("Boston".to_string()),
                    ..Default::default()
                }),
            )
            .await
            .unwrap();

        assert_eq!(dto.address_id, Some(1));
        assert_eq!(dto.city.as_deref(), Some("Boston"));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = AddressManager::new(Arc::new(repo));
        let err = service.find_by_id(999).await.unwrap_err();

        assert!(matches!(err, AppError::AddressNotFound(LookupKey::Id(999))));
        assert!(err.to_string().contains("999"));
    }

    #[tokio::test]
    async fn test_update_without_identity_is_rejected() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_id().never();

        let service = AddressManager::new(Arc::new(repo));
        let err = service
            .update(Some(AddressDto {
                city: Some("Boston".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_address_is_not_an_error() {
        let mut repo = MockAddressRepository::new();
        repo.expect_delete_by_id()
            .with(eq(999))
            .times(1)
            .returning(|_| Ok(()));

        let service = AddressManager::new(Arc::new(repo));
        assert!(service.delete_by_id(999).await.is_ok());
    }
}
