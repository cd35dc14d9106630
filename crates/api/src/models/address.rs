use online_shop_core::AddressId;
use online_shop_core::criteria::{AddressCriteria, CriteriaError};
use online_shop_core::dto::AddressDto;

use super::{Customer, Entity};

/// A customer's postal address.
#[derive(Debug, Clone, Default)]
pub struct Address {
    pub id: Option<AddressId>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country: Option<String>,
    pub customer: Option<Box<Customer>>,
}

impl Entity for Address {
    type Id = AddressId;
    type Dto = AddressDto;
    type Criteria = AddressCriteria;

    const NAME: &'static str = "address";
    const TYPE_NAME: &'static str = "Address";
    const PATH: &'static str = "addresses";
    const SORTABLE: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("address1", "address1"),
        ("address2", "address2"),
        ("city", "city"),
        ("postcode", "postcode"),
        ("country", "country"),
        ("customerId", "customer_id"),
    ];

    fn id(&self) -> Option<AddressId> {
        self.id
    }

    fn dto_id(dto: &AddressDto) -> Option<AddressId> {
        dto.id
    }

    fn to_dto(&self) -> AddressDto {
        AddressDto::from(self)
    }

    fn from_dto(dto: &AddressDto) -> Self {
        Self::from(dto)
    }

    fn parse_criteria<'a, I>(params: I) -> Result<AddressCriteria, CriteriaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        AddressCriteria::from_params(params)
    }
}
