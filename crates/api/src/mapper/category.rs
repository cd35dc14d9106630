use online_shop_core::dto::{CategoryDto, ProductDto};

use crate::models::{Category, Product};

impl From<&Category> for CategoryDto {
    fn from(entity: &Category) -> Self {
        Self {
            id: entity.id,
            description: entity.description.clone(),
            sort_order: entity.sort_order,
            date_added: entity.date_added,
            date_modified: entity.date_modified,
            status: entity.status,
            parent_id: entity.parent.as_ref().and_then(|p| p.id),
            products: entity.products.iter().map(ProductDto::from).collect(),
        }
    }
}

impl From<&CategoryDto> for Category {
    fn from(dto: &CategoryDto) -> Self {
        Self {
            id: dto.id,
            description: dto.description.clone(),
            sort_order: dto.sort_order,
            date_added: dto.date_added,
            date_modified: dto.date_modified,
            status: dto.status,
            parent: Self::from_id(dto.parent_id).map(Box::new),
            products: dto.products.iter().map(Product::from).collect(),
        }
    }
}
