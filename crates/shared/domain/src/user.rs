//! User aggregate and its transfer representation.

use serde::{Deserialize, Serialize};

use crate::address::{Address, AddressDto};
use crate::credential::{Credential, CredentialDto};

/// User aggregate.
///
/// Owns at most one [`Credential`] and any number of [`Address`]es. Owned
/// aggregates reference the user back through their `user_id` foreign key;
/// their own `user` slot stays empty to keep the graph acyclic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Storage-assigned identity (None until persisted)
    pub user_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub credential: Option<Box<Credential>>,
    pub addresses: Vec<Address>,
}

impl User {
    /// Copy of the profile fields only, without owned aggregates.
    pub fn detached(&self) -> Self {
        Self {
            user_id: self.user_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            image_url: self.image_url.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            credential: None,
            addresses: Vec::new(),
        }
    }
}

/// User transfer object.
///
/// Every field is optional: on update paths an absent field means
/// "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Nested credential (scalar fields only)
    #[serde(rename = "credential", skip_serializing_if = "Option::is_none")]
    pub credential_dto: Option<Box<CredentialDto>>,
    /// Owned addresses (scalar fields only)
    #[serde(rename = "addressDtos", skip_serializing_if = "Option::is_none")]
    pub address_dtos: Option<Vec<AddressDto>>,
}
