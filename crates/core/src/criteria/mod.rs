//! Criteria objects for dynamic list and count queries.
//!
//! A criteria object has one optional filter per queryable field. It is
//! parsed from query parameters of the form `field.operator=value`:
//!
//! ```text
//! GET /api/wish-lists?title.contains=birth&customerId.equals=3&id.in=1,2
//! ```
//!
//! Parameters without a dot (`page`, `size`, `sort`, cache busters) are not
//! criteria and are skipped. All filters that are present are combined with
//! logical AND.

mod filter;

pub use filter::{
    ApplyParam, BooleanFilter, CategoryStatusFilter, Filter, IntegerFilter, LocalDateFilter,
    LongFilter, RangeFilter, StringFilter,
};

use thiserror::Error;

/// Errors raised while parsing criteria from query parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CriteriaError {
    /// The field before the dot is not a filterable property.
    #[error("unknown filter field: {0}")]
    UnknownField(String),

    /// The operator after the dot does not apply to the field's type.
    #[error("unknown filter operator: {0}")]
    UnknownOperator(String),

    /// The value cannot be parsed as the field's type.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Full parameter name.
        key: String,
        /// Raw value as received.
        value: String,
    },
}

/// Define a criteria struct whose fields are optional filters, together
/// with a parser mapping camelCase parameter names to fields.
macro_rules! define_criteria {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $field:ident : $filter:ty => $param:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $( pub $field: Option<$filter>, )*
        }

        impl $name {
            /// Build criteria from decoded query parameters.
            ///
            /// # Errors
            ///
            /// Returns a `CriteriaError` for an unknown field or operator, or
            /// a value that does not parse.
            pub fn from_params<'a, I>(params: I) -> Result<Self, CriteriaError>
            where
                I: IntoIterator<Item = (&'a str, &'a str)>,
            {
                let mut criteria = Self::default();
                for (key, value) in params {
                    let Some((field, operator)) = key.split_once('.') else {
                        continue;
                    };
                    match field {
                        $(
                            $param => criteria
                                .$field
                                .get_or_insert_with(Default::default)
                                .apply(operator, value, key)?,
                        )*
                        _ => return Err(CriteriaError::UnknownField(field.to_owned())),
                    }
                }
                Ok(criteria)
            }

            /// Whether no filter is set.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )*
            }
        }
    };
}

define_criteria! {
    /// Filters for listing and counting wish lists.
    WishListCriteria {
        id: LongFilter => "id",
        title: StringFilter => "title",
        restricted: BooleanFilter => "restricted",
        product_id: LongFilter => "productId",
        customer_id: LongFilter => "customerId",
    }
}

define_criteria! {
    /// Filters for listing and counting categories.
    CategoryCriteria {
        id: LongFilter => "id",
        description: StringFilter => "description",
        sort_order: IntegerFilter => "sortOrder",
        date_added: LocalDateFilter => "dateAdded",
        date_modified: LocalDateFilter => "dateModified",
        status: CategoryStatusFilter => "status",
        parent_id: LongFilter => "parentId",
        product_id: LongFilter => "productId",
    }
}

define_criteria! {
    /// Filters for listing and counting products.
    ProductCriteria {
        id: LongFilter => "id",
        title: StringFilter => "title",
        keywords: StringFilter => "keywords",
        description: StringFilter => "description",
        rating: IntegerFilter => "rating",
        date_added: LocalDateFilter => "dateAdded",
        date_modified: LocalDateFilter => "dateModified",
        wish_list_id: LongFilter => "wishListId",
        category_id: LongFilter => "categoryId",
    }
}

define_criteria! {
    /// Filters for listing and counting customers.
    CustomerCriteria {
        id: LongFilter => "id",
        first_name: StringFilter => "firstName",
        last_name: StringFilter => "lastName",
        email: StringFilter => "email",
        telephone: StringFilter => "telephone",
        wish_list_id: LongFilter => "wishListId",
        address_id: LongFilter => "addressId",
    }
}

define_criteria! {
    /// Filters for listing and counting addresses.
    AddressCriteria {
        id: LongFilter => "id",
        address1: StringFilter => "address1",
        address2: StringFilter => "address2",
        city: StringFilter => "city",
        postcode: StringFilter => "postcode",
        country: StringFilter => "country",
        customer_id: LongFilter => "customerId",
    }
}
