use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ProductDto, identity_eq};
use crate::types::{CategoryId, CategoryStatus};
use crate::validation::{Validate, Violation, require};

/// Transfer object for a category.
///
/// Categories own their many-to-many relation to products, so the full
/// product set travels with the category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default)]
    pub id: Option<CategoryId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub date_added: Option<NaiveDate>,
    #[serde(default)]
    pub date_modified: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<CategoryStatus>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default)]
    pub products: Vec<ProductDto>,
}

identity_eq!(CategoryDto);

impl Validate for CategoryDto {
    const OBJECT_NAME: &'static str = "categoryDTO";

    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        require(&mut violations, "description", self.description.as_ref());
        violations
    }
}
