use serde::{Deserialize, Serialize};

use super::identity_eq;
use crate::types::{AddressId, CustomerId};
use crate::validation::{Validate, Violation, max_length, require};

/// Maximum postcode length.
pub const POSTCODE_MAX_LENGTH: usize = 10;

/// Maximum country code length (ISO 3166-1 alpha-2).
pub const COUNTRY_MAX_LENGTH: usize = 2;

/// Transfer object for a postal address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    #[serde(default)]
    pub id: Option<AddressId>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
}

identity_eq!(AddressDto);

impl Validate for AddressDto {
    const OBJECT_NAME: &'static str = "addressDTO";

    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        require(&mut violations, "postcode", self.postcode.as_ref());
        max_length(
            &mut violations,
            "postcode",
            self.postcode.as_deref(),
            POSTCODE_MAX_LENGTH,
        );
        require(&mut violations, "country", self.country.as_ref());
        max_length(
            &mut violations,
            "country",
            self.country.as_deref(),
            COUNTRY_MAX_LENGTH,
        );
        violations
    }
}
