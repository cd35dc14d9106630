use online_shop_core::dto::WishListDto;

use crate::models::{Customer, WishList};

impl From<&WishList> for WishListDto {
    fn from(entity: &WishList) -> Self {
        Self {
            id: entity.id,
            title: entity.title.clone(),
            restricted: entity.restricted,
            customer_id: entity.customer.as_ref().and_then(|c| c.id),
        }
    }
}

impl From<&WishListDto> for WishList {
    fn from(dto: &WishListDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title.clone(),
            restricted: dto.restricted,
            customer: Customer::from_id(dto.customer_id).map(Box::new),
            products: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use online_shop_core::{CustomerId, ProductId, WishListId};

    use super::*;
    use crate::models::Product;

    fn dto() -> WishListDto {
        WishListDto {
            id: Some(WishListId::new(4)),
            title: Some("Birthday".to_owned()),
            restricted: Some(false),
            customer_id: Some(CustomerId::new(9)),
        }
    }

    #[test]
    fn test_to_entity_builds_customer_stub() {
        let entity = WishList::from(&dto());

        assert_eq!(entity.id, Some(WishListId::new(4)));
        assert_eq!(entity.title.as_deref(), Some("Birthday"));
        assert_eq!(entity.customer.map(|c| c.id), Some(Some(CustomerId::new(9))));
        assert!(entity.products.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let original = dto();
        let back = WishListDto::from(&WishList::from(&original));

        assert_eq!(back.id, original.id);
        assert_eq!(back.title, original.title);
        assert_eq!(back.restricted, original.restricted);
        assert_eq!(back.customer_id, original.customer_id);
    }

    #[test]
    fn test_to_dto_ignores_products() {
        let entity = WishList {
            id: Some(WishListId::new(1)),
            title: Some("Holiday".to_owned()),
            products: vec![Product {
                id: Some(ProductId::new(3)),
                ..Product::default()
            }],
            ..WishList::default()
        };

        let dto = WishListDto::from(&entity);
        assert_eq!(dto.customer_id, None);
        assert_eq!(dto.title.as_deref(), Some("Holiday"));
    }
}
