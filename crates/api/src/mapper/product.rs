use online_shop_core::dto::ProductDto;

use crate::models::{Product, WishList};

impl From<&Product> for ProductDto {
    fn from(entity: &Product) -> Self {
        Self {
            id: entity.id,
            title: entity.title.clone(),
            keywords: entity.keywords.clone(),
            description: entity.description.clone(),
            rating: entity.rating,
            date_added: entity.date_added,
            date_modified: entity.date_modified,
            wish_list_id: entity.wish_list.as_ref().and_then(|w| w.id),
        }
    }
}

impl From<&ProductDto> for Product {
    fn from(dto: &ProductDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title.clone(),
            keywords: dto.keywords.clone(),
            description: dto.description.clone(),
            rating: dto.rating,
            date_added: dto.date_added,
            date_modified: dto.date_modified,
            wish_list: WishList::from_id(dto.wish_list_id).map(Box::new),
            categories: Vec::new(),
        }
    }
}
