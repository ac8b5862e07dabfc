use super::{user, TransferMapper};
use crate::address::{Address, AddressDto};
use crate::relationship;

/// Maps [`Address`] <-> [`AddressDto`], expanding the owning user.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressMapper;

impl TransferMapper for AddressMapper {
    type Domain = Address;
    type Transfer = AddressDto;

    fn to_transfer(address: &Address) -> AddressDto {
        AddressDto {
            user_dto: address
                .user
                .as_deref()
                .map(|u| Box::new(user::fields_to_transfer(u))),
            ..fields_to_transfer(address)
        }
    }

    fn to_domain(dto: &AddressDto) -> Address {
        let address = Address {
            user: dto
                .user_dto
                .as_deref()
                .map(|u| Box::new(user::fields_to_domain(u))),
            ..fields_to_domain(dto)
        };
        relationship::link_address(address)
    }
}

pub(crate) fn fields_to_transfer(address: &Address) -> AddressDto {
    AddressDto {
        address_id: address.address_id,
        full_address: address.full_address.clone(),
        postal_code: address.postal_code.clone(),
        city: address.city.clone(),
        user_dto: None,
    }
}

pub(crate) fn fields_to_domain(dto: &AddressDto) -> Address {
    Address {
        address_id: dto.address_id,
        full_address: dto.full_address.clone(),
        postal_code: dto.postal_code.clone(),
        city: dto.city.clone(),
        user_id: None,
        user: None,
    }
}
