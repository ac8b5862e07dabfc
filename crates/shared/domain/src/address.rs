//! Address aggregate and its transfer representation.

use serde::{Deserialize, Serialize};

use crate::user::{User, UserDto};

/// Address aggregate, owned by exactly one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub address_id: Option<i32>,
    pub full_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    /// Owning user's identity (foreign key)
    pub user_id: Option<i32>,
    pub user: Option<Box<User>>,
}

impl Address {
    /// Copy of the address's own fields without the user graph
    pub fn detached(&self) -> Self {
        Self {
            address_id: self.address_id,
            full_address: self.full_address.clone(),
            postal_code: self.postal_code.clone(),
            city: self.city.clone(),
            user_id: self.user_id,
            user: None,
        }
    }
}

/// Address transfer object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    pub address_id: Option<i32>,
    pub full_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    /// Owning user (scalar fields only)
    #[serde(rename = "user", skip_serializing_if = "Option::is_none")]
    pub user_dto: Option<Box<UserDto>>,
}
