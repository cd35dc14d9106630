//! Transfer objects exposed at the API boundary.
//!
//! A transfer object is a flat snapshot of an entity: its scalar fields plus
//! the surrogate ids of related entities (`customerId` rather than an
//! embedded customer). Relationship graphs never leak into responses.
//!
//! # Equality
//!
//! Transfer objects compare by identity. Two instances are equal when both
//! carry the same non-null id. An instance without an id is equal only to
//! itself, compared by reference.

mod address;
mod category;
mod customer;
mod product;
mod wish_list;

pub use address::AddressDto;
pub use category::CategoryDto;
pub use customer::CustomerDto;
pub use product::ProductDto;
pub use wish_list::WishListDto;

/// Implement identity-based `PartialEq`, `Eq` and `Hash` for a transfer
/// object with an `id: Option<_>` field.
macro_rules! identity_eq {
    ($name:ident) => {
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                ::core::ptr::eq(self, other) || (self.id.is_some() && self.id == other.id)
            }
        }

        impl Eq for $name {}

        impl ::core::hash::Hash for $name {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

pub(crate) use identity_eq;
