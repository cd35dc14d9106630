use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::identity_eq;
use crate::types::{ProductId, WishListId};
use crate::validation::{Validate, Violation, require};

/// Transfer object for a product.
///
/// Categories are not carried here: the category side owns the
/// many-to-many relation and embeds its products instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub date_added: Option<NaiveDate>,
    #[serde(default)]
    pub date_modified: Option<NaiveDate>,
    #[serde(default)]
    pub wish_list_id: Option<WishListId>,
}

identity_eq!(ProductDto);

impl Validate for ProductDto {
    const OBJECT_NAME: &'static str = "productDTO";

    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        require(&mut violations, "title", self.title.as_ref());
        violations
    }
}
