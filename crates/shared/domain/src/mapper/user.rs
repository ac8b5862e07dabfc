use super::{address, credential, TransferMapper};
use crate::address::{Address, AddressDto};
use crate::relationship;
use crate::user::{User, UserDto};

/// Maps [`User`] <-> [`UserDto`], expanding the credential and addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserMapper;

impl TransferMapper for UserMapper {
    type Domain = User;
    type Transfer = UserDto;

    fn to_transfer(user: &User) -> UserDto {
        UserDto {
            credential_dto: user
                .credential
                .as_deref()
                .map(|c| Box::new(credential::fields_to_transfer(c))),
            address_dtos: addresses_to_transfer(&user.addresses),
            ..fields_to_transfer(user)
        }
    }

    fn to_domain(dto: &UserDto) -> User {
        let user = User {
            credential: dto
                .credential_dto
                .as_deref()
                .map(|c| Box::new(credential::fields_to_domain(c))),
            addresses: addresses_to_domain(dto.address_dtos.as_deref()),
            ..fields_to_domain(dto)
        };
        relationship::link_user(user)
    }
}

/// Profile fields only; used when a user is nested in another transfer object.
pub(crate) fn fields_to_transfer(user: &User) -> UserDto {
    UserDto {
        user_id: user.user_id,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        image_url: user.image_url.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        credential_dto: None,
        address_dtos: None,
    }
}

pub(crate) fn fields_to_domain(dto: &UserDto) -> User {
    User {
        user_id: dto.user_id,
        first_name: dto.first_name.clone(),
        last_name: dto.last_name.clone(),
        image_url: dto.image_url.clone(),
        email: dto.email.clone(),
        phone: dto.phone.clone(),
        credential: None,
        addresses: Vec::new(),
    }
}

/// An empty address list is reported as absent.
pub(crate) fn addresses_to_transfer(addresses: &[Address]) -> Option<Vec<AddressDto>> {
    if addresses.is_empty() {
        return None;
    }
    Some(addresses.iter().map(address::fields_to_transfer).collect())
}

pub(crate) fn addresses_to_domain(dtos: Option<&[AddressDto]>) -> Vec<Address> {
    dtos.unwrap_or_default()
        .iter()
        .map(address::fields_to_domain)
        .collect()
}
