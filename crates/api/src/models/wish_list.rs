use online_shop_core::WishListId;
use online_shop_core::criteria::{CriteriaError, WishListCriteria};
use online_shop_core::dto::WishListDto;

use super::{Customer, Entity, Product};

/// A named list of products a customer wants.
#[derive(Debug, Clone, Default)]
pub struct WishList {
    pub id: Option<WishListId>,
    pub title: Option<String>,
    pub restricted: Option<bool>,
    /// Owning customer.
    pub customer: Option<Box<Customer>>,
    /// Products on the list. The product side owns this relation.
    pub products: Vec<Product>,
}

impl Entity for WishList {
    type Id = WishListId;
    type Dto = WishListDto;
    type Criteria = WishListCriteria;

    const NAME: &'static str = "wishList";
    const TYPE_NAME: &'static str = "WishList";
    const PATH: &'static str = "wish-lists";
    const SORTABLE: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("title", "title"),
        ("restricted", "restricted"),
        ("customerId", "customer_id"),
    ];

    fn id(&self) -> Option<WishListId> {
        self.id
    }

    fn dto_id(dto: &WishListDto) -> Option<WishListId> {
        dto.id
    }

    fn to_dto(&self) -> WishListDto {
        WishListDto::from(self)
    }

    fn from_dto(dto: &WishListDto) -> Self {
        Self::from(dto)
    }

    fn parse_criteria<'a, I>(params: I) -> Result<WishListCriteria, CriteriaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        WishListCriteria::from_params(params)
    }
}
