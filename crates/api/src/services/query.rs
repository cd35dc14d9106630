//! Criteria queries for one entity type.

use std::sync::Arc;

use tracing::{debug, instrument};

use online_shop_core::page::{Page, PageRequest};

use crate::db::{Repository, RepositoryError};
use crate::models::Entity;

/// Read-only service that lists and counts entities matching criteria.
pub struct QueryService<E: Entity> {
    repository: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for QueryService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<E: Entity> QueryService<E> {
    /// Create a new query service backed by `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self { repository }
    }

    /// One page of entities matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    #[instrument(skip_all, fields(entity = E::TYPE_NAME))]
    pub async fn find_by_criteria(
        &self,
        criteria: &E::Criteria,
        request: &PageRequest,
    ) -> Result<Page<E::Dto>, RepositoryError> {
        debug!(?criteria, page = request.page(), size = request.size(), "find by criteria");
        let page = self.repository.find_by_criteria(criteria, request).await?;
        Ok(page.map(|e| e.to_dto()))
    }

    /// Number of entities matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    #[instrument(skip_all, fields(entity = E::TYPE_NAME))]
    pub async fn count_by_criteria(&self, criteria: &E::Criteria) -> Result<i64, RepositoryError> {
        debug!(?criteria, "count by criteria");
        self.repository.count_by_criteria(criteria).await
    }
}
