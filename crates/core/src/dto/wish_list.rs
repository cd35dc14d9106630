use serde::{Deserialize, Serialize};

use super::identity_eq;
use crate::types::{CustomerId, WishListId};
use crate::validation::{Validate, Violation, require};

/// Transfer object for a wish list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishListDto {
    #[serde(default)]
    pub id: Option<WishListId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub restricted: Option<bool>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
}

identity_eq!(WishListDto);

impl Validate for WishListDto {
    const OBJECT_NAME: &'static str = "wishListDTO";

    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        require(&mut violations, "title", self.title.as_ref());
        violations
    }
}
