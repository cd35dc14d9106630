use online_shop_core::dto::AddressDto;

use crate::models::{Address, Customer};

impl From<&Address> for AddressDto {
    fn from(entity: &Address) -> Self {
        Self {
            id: entity.id,
            address1: entity.address1.clone(),
            address2: entity.address2.clone(),
            city: entity.city.clone(),
            postcode: entity.postcode.clone(),
            country: entity.country.clone(),
            customer_id: entity.customer.as_ref().and_then(|c| c.id),
        }
    }
}

impl From<&AddressDto> for Address {
    fn from(dto: &AddressDto) -> Self {
        Self {
            id: dto.id,
            address1: dto.address1.clone(),
            address2: dto.address2.clone(),
            city: dto.city.clone(),
            postcode: dto.postcode.clone(),
            country: dto.country.clone(),
            customer: Customer::from_id(dto.customer_id).map(Box::new),
        }
    }
}
