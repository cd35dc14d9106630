//! Wish list repository.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use online_shop_core::criteria::WishListCriteria;
use online_shop_core::page::{Page, PageRequest};
use online_shop_core::{CustomerId, WishListId};

use super::filter::{push_filter, push_range_filter, push_string_filter};
use super::table::{self, Table};
use super::{Repository, RepositoryError, begin_read_only};
use crate::models::{Customer, WishList};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` wish list queries.
#[derive(Debug, sqlx::FromRow)]
pub struct WishListRow {
    id: i64,
    title: String,
    restricted: Option<bool>,
    customer_id: Option<i64>,
}

impl From<WishListRow> for WishList {
    fn from(row: WishListRow) -> Self {
        Self {
            id: Some(WishListId::new(row.id)),
            title: Some(row.title),
            restricted: row.restricted,
            customer: Customer::from_id(row.customer_id.map(CustomerId::new)).map(Box::new),
            products: Vec::new(),
        }
    }
}

impl Table for WishList {
    type Row = WishListRow;

    const TABLE: &'static str = "wish_list";
    const ALIAS: &'static str = "w";
    const COLUMNS: &'static [&'static str] = &["id", "title", "restricted", "customer_id"];

    fn key(id: WishListId) -> i64 {
        id.as_i64()
    }

    fn push_criteria(qb: &mut QueryBuilder<'static, Postgres>, criteria: &WishListCriteria) {
        if criteria.product_id.is_some() {
            qb.push(" LEFT JOIN product p ON p.wish_list_id = w.id");
        }
        qb.push(" WHERE TRUE");

        if let Some(f) = &criteria.id {
            push_range_filter(qb, "w.id", f);
        }
        if let Some(f) = &criteria.title {
            push_string_filter(qb, "w.title", f);
        }
        if let Some(f) = &criteria.restricted {
            push_filter(qb, "w.restricted", f);
        }
        if let Some(f) = &criteria.product_id {
            push_range_filter(qb, "p.id", f);
        }
        if let Some(f) = &criteria.customer_id {
            push_range_filter(qb, "w.customer_id", f);
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for wish list database operations.
#[derive(Debug, Clone)]
pub struct WishListRepository {
    pool: PgPool,
}

impl WishListRepository {
    /// Create a new wish list repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(
        conn: &mut PgConnection,
        wish_list: &WishList,
    ) -> Result<WishListRow, RepositoryError> {
        let sql = format!(
            "INSERT INTO wish_list (title, restricted, customer_id) VALUES ($1, $2, $3) \
             RETURNING {}",
            table::columns::<WishList>()
        );
        let row = sqlx::query_as::<_, WishListRow>(&sql)
            .bind(&wish_list.title)
            .bind(wish_list.restricted)
            .bind(customer_key(wish_list))
            .fetch_one(conn)
            .await?;
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: WishListId,
        wish_list: &WishList,
    ) -> Result<Option<WishListRow>, RepositoryError> {
        let sql = format!(
            "UPDATE wish_list SET title = $2, restricted = $3, customer_id = $4 \
             WHERE id = $1 RETURNING {}",
            table::columns::<WishList>()
        );
        let row = sqlx::query_as::<_, WishListRow>(&sql)
            .bind(id.as_i64())
            .bind(&wish_list.title)
            .bind(wish_list.restricted)
            .bind(customer_key(wish_list))
            .fetch_optional(conn)
            .await?;
        Ok(row)
    }
}

fn customer_key(wish_list: &WishList) -> Option<i64> {
    wish_list
        .customer
        .as_ref()
        .and_then(|c| c.id)
        .map(|id| id.as_i64())
}

#[async_trait]
impl Repository<WishList> for WishListRepository {
    async fn save(&self, entity: WishList) -> Result<WishList, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = match entity.id {
            Some(id) => Self::update(&mut tx, id, &entity).await?,
            None => None,
        };
        let row = match updated {
            Some(row) => row,
            None => Self::insert(&mut tx, &entity).await?,
        };

        tx.commit().await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: WishListId) -> Result<Option<WishList>, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let row = table::fetch_row::<WishList>(&mut tx, id).await?;
        tx.commit().await?;
        Ok(row.map(Into::into))
    }

    async fn delete_by_id(&self, id: WishListId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        table::delete_row::<WishList>(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_criteria(
        &self,
        criteria: &WishListCriteria,
        request: &PageRequest,
    ) -> Result<Page<WishList>, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let rows = table::fetch_rows::<WishList>(&mut tx, criteria, request).await?;
        let total = table::count_rows::<WishList>(&mut tx, criteria).await?;
        tx.commit().await?;

        let content = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(content, request, total))
    }

    async fn count_by_criteria(&self, criteria: &WishListCriteria) -> Result<i64, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let count = table::count_rows::<WishList>(&mut tx, criteria).await?;
        tx.commit().await?;
        Ok(count)
    }
}
