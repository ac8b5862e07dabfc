//! User service - Handles user-related use cases.
//!
//! Deleting a user also removes the credential it owns. The user row goes
//! first; if the credential cannot be removed afterwards the operation fails
//! with a cascade inconsistency naming both aggregates.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

use common::{AppError, AppResult, LookupKey};
use domain::merge;
use domain::relationship;
use domain::{AggregateKey, TransferMapper, User, UserDto, UserMapper};

use crate::repository::{CredentialRepository, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn find_all(&self) -> AppResult<Vec<UserDto>>;

    /// Get user by ID
    async fn find_by_id(&self, user_id: i32) -> AppResult<UserDto>;

    /// Get the user owning the credential with the given username
    async fn find_by_credential_username(&self, username: &str) -> AppResult<UserDto>;

    /// Create a user from a transfer object
    async fn save(&self, user_dto: UserDto) -> AppResult<UserDto>;

    /// Partially update the user identified by the payload itself
    async fn update(&self, user_dto: Option<UserDto>) -> AppResult<UserDto>;

    /// Partially update the user with the given ID
    async fn update_by_id(&self, user_id: i32, user_dto: Option<UserDto>) -> AppResult<UserDto>;

    /// Delete user and the credential it owns
    async fn delete_by_id(&self, user_id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using repositories.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    credentials: Arc<dyn CredentialRepository>,
}

impl UserManager {
    /// Create new user service instance with repositories
    pub fn new(
        users: Arc<dyn UserRepository>,
        credentials: Arc<dyn CredentialRepository>,
    ) -> Self {
        Self { users, credentials }
    }

    async fn fetch(&self, user_id: i32) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound(LookupKey::Id(user_id)))
    }

    async fn remove_dependent(&self, dependent: AggregateKey) -> AppResult<()> {
        match dependent {
            AggregateKey::Credential(credential_id) => {
                self.credentials.delete_by_credential_id(credential_id).await
            }
            other => Err(AppError::internal(format!(
                "{} is not a dependent of a user",
                other
            ))),
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn find_all(&self) -> AppResult<Vec<UserDto>> {
        debug!("Fetching all users");
        let users = self.users.find_all().await?;
        Ok(UserMapper::to_transfer_all(&users))
    }

    async fn find_by_id(&self, user_id: i32) -> AppResult<UserDto> {
        debug!(user_id, "Fetching user by id");
        let user = self.fetch(user_id).await?;
        Ok(UserMapper::to_transfer(&user))
    }

    async fn find_by_credential_username(&self, username: &str) -> AppResult<UserDto> {
        debug!(username, "Fetching user by credential username");
        let user = self
            .users
            .find_by_credential_username(username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(LookupKey::Username(username.to_string())))?;
        Ok(UserMapper::to_transfer(&user))
    }

    async fn save(&self, user_dto: UserDto) -> AppResult<UserDto> {
        debug!("Saving user");
        let saved = self.users.save(UserMapper::to_domain(&user_dto)).await?;
        info!(user_id = ?saved.user_id, "User saved");
        Ok(UserMapper::to_transfer(&saved))
    }

    async fn update(&self, user_dto: Option<UserDto>) -> AppResult<UserDto> {
        let user_dto = user_dto.ok_or_else(|| AppError::invalid_payload("User payload is required"))?;
        let user_id = user_dto
            .user_id
            .ok_or_else(|| AppError::invalid_payload("User payload carries no userId"))?;

        self.update_by_id(user_id, Some(user_dto)).await
    }

    async fn update_by_id(&self, user_id: i32, user_dto: Option<UserDto>) -> AppResult<UserDto> {
        let user_dto = user_dto.ok_or_else(|| AppError::invalid_payload("User payload is required"))?;
        debug!(user_id, "Updating user");

        let existing = self.fetch(user_id).await?;
        relationship::ensure_owned_credential(&existing, &user_dto)?;
        let merged = merge::merge_user(&existing, &user_dto);
        let saved = self.users.save(merged).await?;

        info!(user_id, "User updated");
        Ok(UserMapper::to_transfer(&saved))
    }

    async fn delete_by_id(&self, user_id: i32) -> AppResult<()> {
        debug!(user_id, "Deleting user");
        let user = self.fetch(user_id).await?;
        let plan = relationship::plan_user_removal(&user)?;

        self.users.delete_by_id(user_id).await?;

        for &dependent in plan.dependents() {
            if let Err(err) = self.remove_dependent(dependent).await {
                error!(
                    primary = %plan.primary(),
                    dependent = %dependent,
                    error = %err,
                    "Dependent removal failed after primary removal"
                );
                return Err(AppError::cascade_inconsistency(plan.primary(), dependent, err));
            }
        }

        info!(user_id, cascaded = plan.dependents().len(), "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::{MockCredentialRepository, MockUserRepository};
    use domain::{Address, Credential, CredentialDto, Role};

    fn owned_user() -> User {
        relationship::link_user(User {
            user_id: Some(1),
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            phone: Some("1234567890".to_string()),
            credential: Some(Box::new(Credential {
                credential_id: Some(1),
                username: Some("alice".to_string()),
                role: Some(Role::User),
                is_enabled: Some(true),
                ..Default::default()
            })),
            addresses: vec![Address {
                address_id: Some(1),
                full_address: Some("123 Main St".to_string()),
                city: Some("New York".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        })
    }

    fn manager(users: MockUserRepository, credentials: MockCredentialRepository) -> UserManager {
        UserManager::new(Arc::new(users), Arc::new(credentials))
    }

    #[tokio::test]
    async fn test_find_by_id_maps_credential() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(Some(owned_user())));

        let service = manager(users, MockCredentialRepository::new());
        let dto = service.find_by_id(1).await.unwrap();

        assert_eq!(dto.user_id, Some(1));
        assert_eq!(
            dto.credential_dto.and_then(|c| c.username),
            Some("alice".to_string())
        );
        assert_eq!(dto.address_dtos.map(|a| a.len()), Some(1));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let service = manager(users, MockCredentialRepository::new());
        let err = service.find_by_id(999).await.unwrap_err();

        assert!(matches!(err, AppError::UserNotFound(LookupKey::Id(999))));
        assert!(err.to_string().contains("999"));
    }

    #[tokio::test]
    async fn test_find_by_credential_username_not_found() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_credential_username()
            .returning(|_| Ok(None));

        let service = manager(users, MockCredentialRepository::new());
        let err = service
            .find_by_credential_username("nonexistent")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UserNotFound(LookupKey::Username(_))));
        assert!(err.to_string().contains("nonexistent"));
    }

    #[tokio::test]
    async fn test_find_all_maps_every_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_all()
            .returning(|| Ok(vec![owned_user(), User::default()]));

        let service = manager(users, MockCredentialRepository::new());
        let dtos = service.find_all().await.unwrap();

        assert_eq!(dtos.len(), 2);
        assert!(dtos[1].credential_dto.is_none());
    }

    #[tokio::test]
    async fn test_save_returns_assigned_identity() {
        let mut users = MockUserRepository::new();
        users.expect_save().times(1).returning(|mut user| {
            user.user_id = Some(7);
            Ok(relationship::link_user(user))
        });

        let service = manager(users, MockCredentialRepository::new());
        let dto = service
            .save(UserDto {
                first_name: Some("Jane".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(dto.user_id, Some(7));
        assert_eq!(dto.first_name.as_deref(), Some("Jane"));
    }

    #[tokio::test]
    async fn test_update_by_id_merges_sparse_payload() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(owned_user())));
        users
            .expect_save()
            .withf(|user| {
                user.user_id == Some(1)
                    && user.email.as_deref() == Some("jane@example.com")
                    && user.first_name.as_deref() == Some("John")
                    && user.credential.is_some()
            })
            .times(1)
            .returning(Ok);

        let service = manager(users, MockCredentialRepository::new());
        let dto = service
            .update_by_id(
                1,
                Some(UserDto {
                    user_id: Some(42),
                    email: Some("jane@example.com".to_string()),
                    ..Default::default()
                }),
            )
            .await
            .unwrap();

        assert_eq!(dto.user_id, Some(1));
        assert_eq!(dto.email.as_deref(), Some("jane@example.com"));
    }

    #[tokio::test]
    async fn test_update_cannot_take_over_foreign_credential() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(owned_user())));
        users.expect_save().never();

        let service = manager(users, MockCredentialRepository::new());
        let err = service
            .update_by_id(
                1,
                Some(UserDto {
                    credential_dto: Some(Box::new(CredentialDto {
                        credential_id: Some(2),
                        password: Some("p".to_string()),
                        ..Default::default()
                    })),
                    ..Default::default()
                }),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_update_credential_without_id_rewrites_owned_row() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(owned_user())));
        users
            .expect_save()
            .withf(|user| {
                user.credential.as_deref().map(|c| (c.credential_id, c.user_id))
                    == Some((Some(1), Some(1)))
            })
            .times(1)
            .returning(Ok);

        let service = manager(users, MockCredentialRepository::new());
        let dto = service
            .update_by_id(
                1,
                Some(UserDto {
                    credential_dto: Some(Box::new(CredentialDto {
                        username: Some("bob".to_string()),
                        ..Default::default()
                    })),
                    ..Default::default()
                }),
            )
            .await
            .unwrap();

        assert_eq!(
            dto.credential_dto.and_then(|c| c.username),
            Some("bob".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_requires_payload() {
        let service = manager(MockUserRepository::new(), MockCredentialRepository::new());

        let err = service.update_by_id(1, None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));

        let err = service.update(None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));

        let err = service.update(Some(UserDto::default())).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_update_missing_user_does_not_create() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        users.expect_save().never();

        let service = manager(users, MockCredentialRepository::new());
        let err = service
            .update(Some(UserDto {
                user_id: Some(999),
                ..Default::default()
            }))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UserNotFound(LookupKey::Id(999))));
    }

    #[tokio::test]
    async fn test_delete_removes_owned_credential_once() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(owned_user())));
        users
            .expect_delete_by_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(()));

        let mut credentials = MockCredentialRepository::new();
        credentials
            .expect_delete_by_credential_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(()));
        credentials.expect_delete_by_id().never();

        let service = manager(users, credentials);
        assert!(service.delete_by_id(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_without_credential_does_not_cascade() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| {
            Ok(Some(User {
                user_id: Some(2),
                ..Default::default()
            }))
        });
        users.expect_delete_by_id().times(1).returning(|_| Ok(()));

        let mut credentials = MockCredentialRepository::new();
        credentials.expect_delete_by_credential_id().never();

        let service = manager(users, credentials);
        assert!(service.delete_by_id(2).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_cascade_failure_is_surfaced() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|_| Ok(Some(owned_user())));
        users.expect_delete_by_id().times(1).returning(|_| Ok(()));

        let mut credentials = MockCredentialRepository::new();
        credentials
            .expect_delete_by_credential_id()
            .times(1)
            .returning(|_| Err(AppError::internal("connection reset")));

        let service = manager(users, credentials);
        let err = service.delete_by_id(1).await.unwrap_err();

        match err {
            AppError::CascadeInconsistency {
                primary,
                dependent,
                source,
            } => {
                assert_eq!(primary, AggregateKey::User(1));
                assert_eq!(dependent, AggregateKey::Credential(1));
                assert!(matches!(*source, AppError::Internal(_)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_missing_user_fails_before_any_removal() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        users.expect_delete_by_id().never();

        let mut credentials = MockCredentialRepository::new();
        credentials.expect_delete_by_credential_id().never();

        let service = manager(users, credentials);
        let err = service.delete_by_id(999).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
    }
}
