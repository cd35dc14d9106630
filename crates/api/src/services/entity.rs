//! CRUD service for one entity type.

use std::sync::Arc;

use tracing::{debug, instrument};

use online_shop_core::page::{Page, PageRequest};

use crate::db::{Repository, RepositoryError};
use crate::models::Entity;

/// Service for managing one entity type.
///
/// Converts transfer objects to entities, performs exactly one repository
/// call, and converts the result back.
pub struct EntityService<E: Entity> {
    repository: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<E: Entity> EntityService<E> {
    /// Create a new service backed by `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self { repository }
    }

    /// Save an entity. Inserts when `dto` has no id, updates otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if persistence fails.
    #[instrument(skip_all, fields(entity = E::TYPE_NAME))]
    pub async fn save(&self, dto: &E::Dto) -> Result<E::Dto, RepositoryError> {
        debug!(?dto, "Request to save {}", E::TYPE_NAME);
        let saved = self.repository.save(E::from_dto(dto)).await?;
        Ok(saved.to_dto())
    }

    /// Get one page of all entities.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    #[instrument(skip_all, fields(entity = E::TYPE_NAME))]
    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<E::Dto>, RepositoryError> {
        debug!("Request to get all {}s", E::TYPE_NAME);
        let page = self.repository.find_all(request).await?;
        Ok(page.map(|e| e.to_dto()))
    }

    /// Get one entity by id. A missing id is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    #[instrument(skip_all, fields(entity = E::TYPE_NAME, id = %id))]
    pub async fn find_one(&self, id: E::Id) -> Result<Option<E::Dto>, RepositoryError> {
        debug!("Request to get {} : {}", E::TYPE_NAME, id);
        let entity = self.repository.find_by_id(id).await?;
        Ok(entity.map(|e| e.to_dto()))
    }

    /// Delete one entity by id. Deleting a missing id succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the delete fails.
    #[instrument(skip_all, fields(entity = E::TYPE_NAME, id = %id))]
    pub async fn delete(&self, id: E::Id) -> Result<(), RepositoryError> {
        debug!("Request to delete {} : {}", E::TYPE_NAME, id);
        self.repository.delete_by_id(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use online_shop_core::dto::{CategoryDto, ProductDto, WishListDto};
    use online_shop_core::{CustomerId, ProductId, WishListId};

    use super::*;
    use crate::db::memory::MemoryRepository;
    use crate::models::{Category, Product, WishList};

    fn service() -> EntityService<WishList> {
        EntityService::new(Arc::new(MemoryRepository::<WishList>::new()))
    }

    fn new_wish_list(title: &str) -> WishListDto {
        WishListDto {
            title: Some(title.to_owned()),
            customer_id: Some(CustomerId::new(3)),
            ..WishListDto::default()
        }
    }

    #[tokio::test]
    async fn test_save_then_find_one() {
        let service = service();

        let saved = service.save(&new_wish_list("Birthday")).await.unwrap();
        let id = saved.id.unwrap();
        let found = service.find_one(id).await.unwrap().unwrap();

        assert_eq!(found.title.as_deref(), Some("Birthday"));
        assert_eq!(found.customer_id, Some(CustomerId::new(3)));
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let service = service();
        let mut saved = service.save(&new_wish_list("Birthday")).await.unwrap();

        saved.title = Some("Birthday 2025".to_owned());
        let updated = service.save(&saved).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.title.as_deref(), Some("Birthday 2025"));
    }

    #[tokio::test]
    async fn test_find_one_missing_is_none() {
        let found = service().find_one(WishListId::new(999)).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_succeeds() {
        assert!(service().delete(WishListId::new(999)).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_all_keeps_page_metadata() {
        let service = service();
        for title in ["a", "b", "c"] {
            service.save(&new_wish_list(title)).await.unwrap();
        }

        let page = service.find_all(&PageRequest::of(1, 2)).await.unwrap();

        assert_eq!(page.total_elements, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 2);
        assert_eq!(page.content.len(), 1);
    }

    #[tokio::test]
    async fn test_category_save_keeps_products() {
        let service: EntityService<Category> =
            EntityService::new(Arc::new(MemoryRepository::<Category>::new()));
        let dto = CategoryDto {
            description: Some("Kitchen".to_owned()),
            products: vec![ProductDto {
                id: Some(ProductId::new(4)),
                ..ProductDto::default()
            }],
            ..CategoryDto::default()
        };

        let saved = service.save(&dto).await.unwrap();
        assert_eq!(saved.products.len(), 1);
    }

    #[tokio::test]
    async fn test_product_save_keeps_wish_list() {
        let service: EntityService<Product> =
            EntityService::new(Arc::new(MemoryRepository::<Product>::new()));
        let dto = ProductDto {
            title: Some("Kettle".to_owned()),
            wish_list_id: Some(WishListId::new(2)),
            ..ProductDto::default()
        };

        let saved = service.save(&dto).await.unwrap();
        assert_eq!(saved.wish_list_id, Some(WishListId::new(2)));
        assert_eq!(saved.title.as_deref(), Some("Kettle"));
    }
}
