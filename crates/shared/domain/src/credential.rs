//! Credential aggregate, role vocabulary and transfer representation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::error::DomainError;
use crate::user::{User, UserDto};

/// Role-based authority granted by a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Storage and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(DomainError::unknown_role(other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Credential aggregate.
///
/// The credential row owns the User<->Credential relationship in storage
/// through `user_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// Storage-assigned identity (None until persisted)
    pub credential_id: Option<i32>,
    pub username: Option<String>,
    /// Opaque secret; hashing happens outside this service
    pub password: Option<String>,
    pub role: Option<Role>,
    pub is_enabled: Option<bool>,
    pub is_account_non_expired: Option<bool>,
    pub is_account_non_locked: Option<bool>,
    pub is_credentials_non_expired: Option<bool>,
    /// Owning user's identity (foreign key)
    pub user_id: Option<i32>,
    pub user: Option<Box<User>>,
}

impl Credential {
    /// Copy of the credential's own fields, keeping the foreign key but
    /// dropping the user graph.
    pub fn detached(&self) -> Self {
        Self {
            credential_id: self.credential_id,
            username: self.username.clone(),
            password: self.password.clone(),
            role: self.role,
            is_enabled: self.is_enabled,
            is_account_non_expired: self.is_account_non_expired,
            is_account_non_locked: self.is_account_non_locked,
            is_credentials_non_expired: self.is_credentials_non_expired,
            user_id: self.user_id,
            user: None,
        }
    }
}

/// Credential transfer object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CredentialDto {
    pub credential_id: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role_based_authority: Option<Role>,
    pub is_enabled: Option<bool>,
    pub is_account_non_expired: Option<bool>,
    pub is_account_non_locked: Option<bool>,
    pub is_credentials_non_expired: Option<bool>,
    /// Owning user (scalar fields only)
    #[serde(rename = "user", skip_serializing_if = "Option::is_none")]
    pub user_dto: Option<Box<UserDto>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_storage_values() {
        assert_eq!("ROLE_USER".parse::<Role>(), Ok(Role::User));
        assert_eq!("ROLE_ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(
            "ROLE_ROOT".parse::<Role>(),
            Err(DomainError::UnknownRole("ROLE_ROOT".to_string()))
        );
    }

    #[test]
    fn role_display_matches_wire_format() {
        assert_eq!(Role::Admin.to_string(), ROLE_ADMIN);
    }
}
