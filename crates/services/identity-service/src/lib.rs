//! Identity Service Library
//!
//! Provides the User, Credential, Address and VerificationToken services over
//! a SeaORM-backed store. A transport layer wires [`IdentityServices`] into
//! its handlers; the bundled binary only covers database maintenance.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;

use crate::config::IdentityServiceConfig;
use crate::infra::Database;
use crate::repository::{AddressStore, CredentialStore, UserStore, VerificationTokenStore};
use crate::service::{
    AddressManager, AddressService, CredentialManager, CredentialService, UserManager,
    UserService, VerificationTokenManager, VerificationTokenService,
};

/// All aggregate services sharing one database connection.
#[derive(Clone)]
pub struct IdentityServices {
    pub users: Arc<dyn UserService>,
    pub credentials: Arc<dyn CredentialService>,
    pub addresses: Arc<dyn AddressService>,
    pub verification_tokens: Arc<dyn VerificationTokenService>,
}

impl IdentityServices {
    /// Build every repository and service over the given connection.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let credential_repo = Arc::new(CredentialStore::new(db.clone()));
        let user_repo = Arc::new(UserStore::new(db.clone()));

        Self {
            users: Arc::new(UserManager::new(user_repo, credential_repo.clone())),
            credentials: Arc::new(CredentialManager::new(credential_repo)),
            addresses: Arc::new(AddressManager::new(Arc::new(AddressStore::new(db.clone())))),
            verification_tokens: Arc::new(VerificationTokenManager::new(Arc::new(
                VerificationTokenStore::new(db),
            ))),
        }
    }

    /// Connect, apply pending migrations and build the services.
    pub async fn connect(config: &IdentityServiceConfig) -> Result<Self, DbErr> {
        let db = Database::connect(&config.database).await?;
        Ok(Self::from_connection(db.get_connection()))
    }
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = IdentityServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Check that the configured database answers.
pub async fn ping() -> Result<(), Box<dyn std::error::Error>> {
    let config = IdentityServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    db.ping().await?;
    info!("Database is reachable");

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
