use chrono::NaiveDate;

use online_shop_core::ProductId;
use online_shop_core::criteria::{CriteriaError, ProductCriteria};
use online_shop_core::dto::ProductDto;

use super::{Category, Entity, WishList};

/// A product that can be listed in categories and wish lists.
#[derive(Debug, Clone, Default)]
pub struct Product {
    pub id: Option<ProductId>,
    pub title: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i32>,
    pub date_added: Option<NaiveDate>,
    pub date_modified: Option<NaiveDate>,
    pub wish_list: Option<Box<WishList>>,
    /// Categories listing this product. The category side owns this relation.
    pub categories: Vec<Category>,
}

impl Entity for Product {
    type Id = ProductId;
    type Dto = ProductDto;
    type Criteria = ProductCriteria;

    const NAME: &'static str = "product";
    const TYPE_NAME: &'static str = "Product";
    const PATH: &'static str = "products";
    const SORTABLE: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("title", "title"),
        ("keywords", "keywords"),
        ("description", "description"),
        ("rating", "rating"),
        ("dateAdded", "date_added"),
        ("dateModified", "date_modified"),
        ("wishListId", "wish_list_id"),
    ];

    fn id(&self) -> Option<ProductId> {
        self.id
    }

    fn dto_id(dto: &ProductDto) -> Option<ProductId> {
        dto.id
    }

    fn to_dto(&self) -> ProductDto {
        ProductDto::from(self)
    }

    fn from_dto(dto: &ProductDto) -> Self {
        Self::from(dto)
    }

    fn parse_criteria<'a, I>(params: I) -> Result<ProductCriteria, CriteriaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        ProductCriteria::from_params(params)
    }
}
