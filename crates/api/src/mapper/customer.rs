use online_shop_core::dto::CustomerDto;

use crate::models::Customer;

impl From<&Customer> for CustomerDto {
    fn from(entity: &Customer) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name.clone(),
            last_name: entity.last_name.clone(),
            email: entity.email.clone(),
            telephone: entity.telephone.clone(),
        }
    }
}

impl From<&CustomerDto> for Customer {
    fn from(dto: &CustomerDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name.clone(),
            last_name: dto.last_name.clone(),
            email: dto.email.clone(),
            telephone: dto.telephone.clone(),
            wish_lists: Vec::new(),
            addresses: Vec::new(),
        }
    }
}
