use serde::{Deserialize, Serialize};

use super::identity_eq;
use crate::types::CustomerId;
use crate::validation::{Validate, Violation};

/// Transfer object for a customer.
///
/// Owned wish lists and addresses are reachable through their own resources
/// (filter by `customerId`), never embedded here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default)]
    pub id: Option<CustomerId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
}

identity_eq!(CustomerDto);

impl Validate for CustomerDto {
    const OBJECT_NAME: &'static str = "customerDTO";

    fn validate(&self) -> Vec<Violation> {
        Vec::new()
    }
}
