use online_shop_core::CustomerId;
use online_shop_core::criteria::{CriteriaError, CustomerCriteria};
use online_shop_core::dto::CustomerDto;

use super::{Address, Entity, WishList};

/// A shop customer.
#[derive(Debug, Clone, Default)]
pub struct Customer {
    pub id: Option<CustomerId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub wish_lists: Vec<WishList>,
    pub addresses: Vec<Address>,
}

impl Entity for Customer {
    type Id = CustomerId;
    type Dto = CustomerDto;
    type Criteria = CustomerCriteria;

    const NAME: &'static str = "customer";
    const TYPE_NAME: &'static str = "Customer";
    const PATH: &'static str = "customers";
    const SORTABLE: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("firstName", "first_name"),
        ("lastName", "last_name"),
        ("email", "email"),
        ("telephone", "telephone"),
    ];

    fn id(&self) -> Option<CustomerId> {
        self.id
    }

    fn dto_id(dto: &CustomerDto) -> Option<CustomerId> {
        dto.id
    }

    fn to_dto(&self) -> CustomerDto {
        CustomerDto::from(self)
    }

    fn from_dto(dto: &CustomerDto) -> Self {
        Self::from(dto)
    }

    fn parse_criteria<'a, I>(params: I) -> Result<CustomerCriteria, CriteriaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        CustomerCriteria::from_params(params)
    }
}
