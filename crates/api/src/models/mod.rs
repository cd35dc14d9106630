//! Persistent entities.
//!
//! Entities hold the relationship graph the transfer objects flatten away:
//! a `WishList` references its `Customer` and holds its `Product`s. A
//! related entity that was never loaded is represented by an id-only stub
//! (see the `from_id` constructors in [`crate::mapper`]).
//!
//! Every entity implements [`Entity`], which ties together its id type,
//! transfer object, criteria and naming so services and REST handlers can be
//! written once for all five resources.

mod address;
mod category;
mod customer;
mod product;
mod wish_list;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use online_shop_core::criteria::CriteriaError;
use online_shop_core::validation::Validate;

pub use address::Address;
pub use category::Category;
pub use customer::Customer;
pub use product::Product;
pub use wish_list::WishList;

/// A persistent entity exposed as a REST resource.
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    /// Surrogate id type.
    type Id: Copy + Eq + fmt::Display + fmt::Debug + DeserializeOwned + Send + Sync + 'static;

    /// Transfer object exchanged at the API boundary.
    type Dto: Clone + fmt::Debug + Serialize + DeserializeOwned + Validate + Send + Sync + 'static;

    /// Filters accepted by list and count queries.
    type Criteria: Clone + fmt::Debug + Default + Send + Sync + 'static;

    /// Entity name as used in alert headers and error bodies (`wishList`).
    const NAME: &'static str;

    /// Entity name as used in log messages (`WishList`).
    const TYPE_NAME: &'static str;

    /// Collection path below `/api` (`wish-lists`).
    const PATH: &'static str;

    /// Sortable properties, mapped to their column.
    const SORTABLE: &'static [(&'static str, &'static str)];

    /// Id, or `None` while the entity is still transient.
    fn id(&self) -> Option<Self::Id>;

    /// Id carried by a transfer object.
    fn dto_id(dto: &Self::Dto) -> Option<Self::Id>;

    /// Map to the transfer object.
    fn to_dto(&self) -> Self::Dto;

    /// Map from the transfer object.
    fn from_dto(dto: &Self::Dto) -> Self;

    /// Parse criteria from decoded query parameters.
    ///
    /// # Errors
    ///
    /// Returns `CriteriaError` for an unknown field or operator, or a value
    /// that does not parse.
    fn parse_criteria<'a, I>(params: I) -> Result<Self::Criteria, CriteriaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>;

    /// Column for a sortable property, or `None` if it cannot be sorted on.
    #[must_use]
    fn sort_column(property: &str) -> Option<&'static str> {
        Self::SORTABLE
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, column)| *column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_lookup() {
        assert_eq!(WishList::sort_column("title"), Some("title"));
        assert_eq!(Product::sort_column("dateAdded"), Some("date_added"));
        assert_eq!(Category::sort_column("parentId"), Some("parent_id"));
        assert_eq!(Customer::sort_column("password"), None);
    }

    #[test]
    fn test_every_resource_sorts_by_id() {
        assert_eq!(Customer::sort_column("id"), Some("id"));
        assert_eq!(Address::sort_column("id"), Some("id"));
        assert_eq!(WishList::sort_column("id"), Some("id"));
        assert_eq!(Category::sort_column("id"), Some("id"));
        assert_eq!(Product::sort_column("id"), Some("id"));
    }

    #[test]
    fn test_names_and_paths() {
        assert_eq!((WishList::NAME, WishList::PATH), ("wishList", "wish-lists"));
        assert_eq!((Address::NAME, Address::PATH), ("address", "addresses"));
        assert_eq!((Category::NAME, Category::PATH), ("category", "categories"));
    }
}
