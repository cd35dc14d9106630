use chrono::NaiveDate;

use online_shop_core::criteria::{CategoryCriteria, CriteriaError};
use online_shop_core::dto::CategoryDto;
use online_shop_core::{CategoryId, CategoryStatus};

use super::{Entity, Product};

/// A node in the category tree.
#[derive(Debug, Clone, Default)]
pub struct Category {
    pub id: Option<CategoryId>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub date_added: Option<NaiveDate>,
    pub date_modified: Option<NaiveDate>,
    pub status: Option<CategoryStatus>,
    pub parent: Option<Box<Category>>,
    /// Products in this category. This side owns the many-to-many relation.
    pub products: Vec<Product>,
}

impl Entity for Category {
    type Id = CategoryId;
    type Dto = CategoryDto;
    type Criteria = CategoryCriteria;

    const NAME: &'static str = "category";
    const TYPE_NAME: &'static str = "Category";
    const PATH: &'static str = "categories";
    const SORTABLE: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("description", "description"),
        ("sortOrder", "sort_order"),
        ("dateAdded", "date_added"),
        ("dateModified", "date_modified"),
        ("status", "status"),
        ("parentId", "parent_id"),
    ];

    fn id(&self) -> Option<CategoryId> {
        self.id
    }

    fn dto_id(dto: &CategoryDto) -> Option<CategoryId> {
        dto.id
    }

    fn to_dto(&self) -> CategoryDto {
        CategoryDto::from(self)
    }

    fn from_dto(dto: &CategoryDto) -> Self {
        Self::from(dto)
    }

    fn parse_criteria<'a, I>(params: I) -> Result<CategoryCriteria, CriteriaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        CategoryCriteria::from_params(params)
    }
}
