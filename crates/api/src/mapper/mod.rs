//! Conversions between entities and transfer objects.
//!
//! `Entity -> Dto` is complete: relations are flattened to surrogate ids.
//! `Dto -> Entity` is partial: relation ids become id-only stubs, and the
//! collections owned by the other side of a relation are left empty for the
//! persistence layer to manage. Only a category rebuilds its products,
//! because the category owns that relation.

mod address;
mod category;
mod customer;
mod product;
mod wish_list;

/// Implement `from_id` for an entity with an `id: Option<_>` field and a
/// `Default` impl.
macro_rules! impl_from_id {
    ($entity:ty, $id:ty) => {
        impl $entity {
            /// Id-only stub, or `None` when there is no id.
            #[must_use]
            pub fn from_id(id: Option<$id>) -> Option<Self> {
                id.map(|id| Self {
                    id: Some(id),
                    ..Self::default()
                })
            }
        }
    };
}

impl_from_id!(crate::models::Address, online_shop_core::AddressId);
impl_from_id!(crate::models::Category, online_shop_core::CategoryId);
impl_from_id!(crate::models::Customer, online_shop_core::CustomerId);
impl_from_id!(crate::models::Product, online_shop_core::ProductId);
impl_from_id!(crate::models::WishList, online_shop_core::WishListId);
