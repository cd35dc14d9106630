//! In-memory repositories for handler and service tests.
//!
//! Criteria are evaluated with the core filters' `matches` functions, which
//! follow the same null semantics as the SQL translation. Results are always
//! ordered by id; requested sort orders are ignored.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use online_shop_core::criteria::{
    AddressCriteria, CategoryCriteria, CustomerCriteria, ProductCriteria, WishListCriteria,
};
use online_shop_core::page::{Page, PageRequest};
use online_shop_core::{AddressId, CategoryId, CustomerId, ProductId, WishListId};

use super::{Repository, RepositoryError};
use crate::models::{Address, Category, Customer, Entity, Product, WishList};

/// An entity that can live in a [`MemoryRepository`].
pub trait Stored: Entity {
    fn key(id: Self::Id) -> i64;
    fn with_key(self, key: i64) -> Self;
    fn matches(&self, criteria: &Self::Criteria) -> bool;
}

/// A repository backed by a map, with ids assigned from a counter.
pub struct MemoryRepository<E> {
    state: Mutex<State<E>>,
}

struct State<E> {
    rows: BTreeMap<i64, E>,
    next_id: i64,
}

impl<E: Stored> MemoryRepository<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(State {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State<E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn matching(&self, criteria: &E::Criteria) -> Vec<E> {
        self.lock()
            .rows
            .values()
            .filter(|e| e.matches(criteria))
            .cloned()
            .collect()
    }
}

impl<E: Stored> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Stored> Repository<E> for MemoryRepository<E> {
    async fn save(&self, entity: E) -> Result<E, RepositoryError> {
        let mut state = self.lock();
        let existing = entity
            .id()
            .map(E::key)
            .filter(|key| state.rows.contains_key(key));
        let key = if let Some(key) = existing {
            key
        } else {
            let key = state.next_id;
            state.next_id += 1;
            key
        };
        let saved = entity.with_key(key);
        state.rows.insert(key, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, RepositoryError> {
        Ok(self.lock().rows.get(&E::key(id)).cloned())
    }

    async fn delete_by_id(&self, id: E::Id) -> Result<(), RepositoryError> {
        self.lock().rows.remove(&E::key(id));
        Ok(())
    }

    async fn find_by_criteria(
        &self,
        criteria: &E::Criteria,
        request: &PageRequest,
    ) -> Result<Page<E>, RepositoryError> {
        let matching = self.matching(criteria);
        let total = i64::try_from(matching.len()).unwrap_or(i64::MAX);
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let content = matching.into_iter().skip(skip).take(take).collect();
        Ok(Page::new(content, request, total))
    }

    async fn count_by_criteria(&self, criteria: &E::Criteria) -> Result<i64, RepositoryError> {
        Ok(i64::try_from(self.matching(criteria).len()).unwrap_or(i64::MAX))
    }
}

fn raw<T: Into<i64>>(id: Option<T>) -> Option<i64> {
    id.map(Into::into)
}

impl Stored for WishList {
    fn key(id: WishListId) -> i64 {
        id.as_i64()
    }

    fn with_key(mut self, key: i64) -> Self {
        self.id = Some(WishListId::new(key));
        self
    }

    fn matches(&self, c: &WishListCriteria) -> bool {
        let product_ids: Vec<i64> = self.products.iter().filter_map(|p| raw(p.id)).collect();
        let customer_id = raw(self.customer.as_ref().and_then(|c| c.id));

        c.id.as_ref().is_none_or(|f| f.matches(raw(self.id).as_ref()))
            && c.title.as_ref().is_none_or(|f| f.matches(self.title.as_deref()))
            && c.restricted
                .as_ref()
                .is_none_or(|f| f.matches(self.restricted.as_ref()))
            && c.product_id.as_ref().is_none_or(|f| f.matches_any(&product_ids))
            && c.customer_id
                .as_ref()
                .is_none_or(|f| f.matches(customer_id.as_ref()))
    }
}

impl Stored for Product {
    fn key(id: ProductId) -> i64 {
        id.as_i64()
    }

    fn with_key(mut self, key: i64) -> Self {
        self.id = Some(ProductId::new(key));
        self
    }

    fn matches(&self, c: &ProductCriteria) -> bool {
        let category_ids: Vec<i64> = self.categories.iter().filter_map(|x| raw(x.id)).collect();
        let wish_list_id = raw(self.wish_list.as_ref().and_then(|w| w.id));

        c.id.as_ref().is_none_or(|f| f.matches(raw(self.id).as_ref()))
            && c.title.as_ref().is_none_or(|f| f.matches(self.title.as_deref()))
            && c.keywords
                .as_ref()
                .is_none_or(|f| f.matches(self.keywords.as_deref()))
            && c.description
                .as_ref()
                .is_none_or(|f| f.matches(self.description.as_deref()))
            && c.rating.as_ref().is_none_or(|f| f.matches(self.rating.as_ref()))
            && c.date_added
                .as_ref()
                .is_none_or(|f| f.matches(self.date_added.as_ref()))
            && c.date_modified
                .as_ref()
                .is_none_or(|f| f.matches(self.date_modified.as_ref()))
            && c.wish_list_id
                .as_ref()
                .is_none_or(|f| f.matches(wish_list_id.as_ref()))
            && c.category_id
                .as_ref()
                .is_none_or(|f| f.matches_any(&category_ids))
    }
}

impl Stored for Customer {
    fn key(id: CustomerId) -> i64 {
        id.as_i64()
    }

    fn with_key(mut self, key: i64) -> Self {
        self.id = Some(CustomerId::new(key));
        self
    }

    fn matches(&self, c: &CustomerCriteria) -> bool {
        let wish_list_ids: Vec<i64> = self.wish_lists.iter().filter_map(|w| raw(w.id)).collect();
        let address_ids: Vec<i64> = self.addresses.iter().filter_map(|a| raw(a.id)).collect();

        c.id.as_ref().is_none_or(|f| f.matches(raw(self.id).as_ref()))
            && c.first_name
                .as_ref()
                .is_none_or(|f| f.matches(self.first_name.as_deref()))
            && c.last_name
                .as_ref()
                .is_none_or(|f| f.matches(self.last_name.as_deref()))
            && c.email.as_ref().is_none_or(|f| f.matches(self.email.as_deref()))
            && c.telephone
                .as_ref()
                .is_none_or(|f| f.matches(self.telephone.as_deref()))
            && c.wish_list_id
                .as_ref()
                .is_none_or(|f| f.matches_any(&wish_list_ids))
            && c.address_id
                .as_ref()
                .is_none_or(|f| f.matches_any(&address_ids))
    }
}

impl Stored for Address {
    fn key(id: AddressId) -> i64 {
        id.as_i64()
    }

    fn with_key(mut self, key: i64) -> Self {
        self.id = Some(AddressId::new(key));
        self
    }

    fn matches(&self, c: &AddressCriteria) -> bool {
        let customer_id = raw(self.customer.as_ref().and_then(|c| c.id));

        c.id.as_ref().is_none_or(|f| f.matches(raw(self.id).as_ref()))
            && c.address1
                .as_ref()
                .is_none_or(|f| f.matches(self.address1.as_deref()))
            && c.address2
                .as_ref()
                .is_none_or(|f| f.matches(self.address2.as_deref()))
            && c.city.as_ref().is_none_or(|f| f.matches(self.city.as_deref()))
            && c.postcode
                .as_ref()
                .is_none_or(|f| f.matches(self.postcode.as_deref()))
            && c.country
                .as_ref()
                .is_none_or(|f| f.matches(self.country.as_deref()))
            && c.customer_id
                .as_ref()
                .is_none_or(|f| f.matches(customer_id.as_ref()))
    }
}

impl Stored for Category {
    fn key(id: CategoryId) -> i64 {
        id.as_i64()
    }

    fn with_key(mut self, key: i64) -> Self {
        self.id = Some(CategoryId::new(key));
        self
    }

    fn matches(&self, c: &CategoryCriteria) -> bool {
        let product_ids: Vec<i64> = self.products.iter().filter_map(|p| raw(p.id)).collect();
        let parent_id = raw(self.parent.as_ref().and_then(|p| p.id));

        c.id.as_ref().is_none_or(|f| f.matches(raw(self.id).as_ref()))
            && c.description
                .as_ref()
                .is_none_or(|f| f.matches(self.description.as_deref()))
            && c.sort_order
                .as_ref()
                .is_none_or(|f| f.matches(self.sort_order.as_ref()))
            && c.date_added
                .as_ref()
                .is_none_or(|f| f.matches(self.date_added.as_ref()))
            && c.date_modified
                .as_ref()
                .is_none_or(|f| f.matches(self.date_modified.as_ref()))
            && c.status.as_ref().is_none_or(|f| f.matches(self.status.as_ref()))
            && c.parent_id
                .as_ref()
                .is_none_or(|f| f.matches(parent_id.as_ref()))
            && c.product_id
                .as_ref()
                .is_none_or(|f| f.matches_any(&product_ids))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use online_shop_core::criteria::{Filter, LongFilter, StringFilter};

    use super::*;

    fn wish_list(title: &str, customer: Option<i64>) -> WishList {
        WishList {
            title: Some(title.to_owned()),
            customer: Customer::from_id(customer.map(CustomerId::new)).map(Box::new),
            ..WishList::default()
        }
    }

    #[tokio::test]
    async fn test_save_assigns_ids() {
        let repo = MemoryRepository::<WishList>::new();

        let first = repo.save(wish_list("Birthday", None)).await.unwrap();
        let second = repo.save(wish_list("Holiday", None)).await.unwrap();

        assert_eq!(first.id, Some(WishListId::new(1)));
        assert_eq!(second.id, Some(WishListId::new(2)));
    }

    #[tokio::test]
    async fn test_update_of_missing_id_inserts_new_row() {
        let repo = MemoryRepository::<WishList>::new();
        let mut ghost = wish_list("Ghost", None);
        ghost.id = Some(WishListId::new(99));

        let saved = repo.save(ghost).await.unwrap();

        assert_eq!(saved.id, Some(WishListId::new(1)));
        assert!(repo.find_by_id(WishListId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_criteria_and_paging() {
        let repo = MemoryRepository::<WishList>::new();
        for (title, customer) in [("Birthday", Some(1)), ("Birthday 2", Some(2)), ("Holiday", Some(1))] {
            repo.save(wish_list(title, customer)).await.unwrap();
        }

        let criteria = WishListCriteria {
            title: Some(StringFilter {
                contains: Some("BIRTH".to_owned()),
                ..StringFilter::default()
            }),
            ..WishListCriteria::default()
        };
        assert_eq!(repo.count_by_criteria(&criteria).await.unwrap(), 2);

        let by_customer = WishListCriteria {
            customer_id: Some(LongFilter {
                base: Filter {
                    equals: Some(1),
                    ..Filter::default()
                },
                ..LongFilter::default()
            }),
            ..WishListCriteria::default()
        };
        let page = repo
            .find_by_criteria(&by_customer, &PageRequest::of(1, 1))
            .await
            .unwrap();
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.content.len(), 1);
        assert_eq!(
            page.content.first().and_then(|w| w.title.clone()),
            Some("Holiday".to_owned())
        );
    }
}
