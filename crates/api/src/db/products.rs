//! Product repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use online_shop_core::criteria::ProductCriteria;
use online_shop_core::page::{Page, PageRequest};
use online_shop_core::{ProductId, WishListId};

use super::filter::{push_range_filter, push_string_filter};
use super::table::{self, Table};
use super::{Repository, RepositoryError, begin_read_only};
use crate::models::{Product, WishList};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
pub struct ProductRow {
    id: i64,
    title: String,
    keywords: Option<String>,
    description: Option<String>,
    rating: Option<i32>,
    date_added: Option<NaiveDate>,
    date_modified: Option<NaiveDate>,
    wish_list_id: Option<i64>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: Some(ProductId::new(row.id)),
            title: Some(row.title),
            keywords: row.keywords,
            description: row.description,
            rating: row.rating,
            date_added: row.date_added,
            date_modified: row.date_modified,
            wish_list: WishList::from_id(row.wish_list_id.map(WishListId::new)).map(Box::new),
            categories: Vec::new(),
        }
    }
}

impl Table for Product {
    type Row = ProductRow;

    const TABLE: &'static str = "product";
    const ALIAS: &'static str = "p";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "keywords",
        "description",
        "rating",
        "date_added",
        "date_modified",
        "wish_list_id",
    ];

    fn key(id: ProductId) -> i64 {
        id.as_i64()
    }

    fn push_criteria(qb: &mut QueryBuilder<'static, Postgres>, criteria: &ProductCriteria) {
        if criteria.category_id.is_some() {
            qb.push(" LEFT JOIN category_product cp ON cp.product_id = p.id");
        }
        qb.push(" WHERE TRUE");

        if let Some(f) = &criteria.id {
            push_range_filter(qb, "p.id", f);
        }
        if let Some(f) = &criteria.title {
            push_string_filter(qb, "p.title", f);
        }
        if let Some(f) = &criteria.keywords {
            push_string_filter(qb, "p.keywords", f);
        }
        if let Some(f) = &criteria.description {
            push_string_filter(qb, "p.description", f);
        }
        if let Some(f) = &criteria.rating {
            push_range_filter(qb, "p.rating", f);
        }
        if let Some(f) = &criteria.date_added {
            push_range_filter(qb, "p.date_added", f);
        }
        if let Some(f) = &criteria.date_modified {
            push_range_filter(qb, "p.date_modified", f);
        }
        if let Some(f) = &criteria.wish_list_id {
            push_range_filter(qb, "p.wish_list_id", f);
        }
        if let Some(f) = &criteria.category_id {
            push_range_filter(qb, "cp.category_id", f);
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(conn: &mut PgConnection, product: &Product) -> Result<ProductRow, RepositoryError> {
        let sql = format!(
            "INSERT INTO product \
             (title, keywords, description, rating, date_added, date_modified, wish_list_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            table::columns::<Product>()
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&product.title)
            .bind(&product.keywords)
            .bind(&product.description)
            .bind(product.rating)
            .bind(product.date_added)
            .bind(product.date_modified)
            .bind(wish_list_key(product))
            .fetch_one(conn)
            .await?;
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: ProductId,
        product: &Product,
    ) -> Result<Option<ProductRow>, RepositoryError> {
        let sql = format!(
            "UPDATE product SET title = $2, keywords = $3, description = $4, rating = $5, \
             date_added = $6, date_modified = $7, wish_list_id = $8 \
             WHERE id = $1 RETURNING {}",
            table::columns::<Product>()
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_i64())
            .bind(&product.title)
            .bind(&product.keywords)
            .bind(&product.description)
            .bind(product.rating)
            .bind(product.date_added)
            .bind(product.date_modified)
            .bind(wish_list_key(product))
            .fetch_optional(conn)
            .await?;
        Ok(row)
    }
}

fn wish_list_key(product: &Product) -> Option<i64> {
    product
        .wish_list
        .as_ref()
        .and_then(|w| w.id)
        .map(|id| id.as_i64())
}

#[async_trait]
impl Repository<Product> for ProductRepository {
    async fn save(&self, entity: Product) -> Result<Product, RepositoryError> {
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

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let row = table::fetch_row::<Product>(&mut tx, id).await?;
        tx.commit().await?;
        Ok(row.map(Into::into))
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        table::delete_row::<Product>(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_criteria(
        &self,
        criteria: &ProductCriteria,
        request: &PageRequest,
    ) -> Result<Page<Product>, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let rows = table::fetch_rows::<Product>(&mut tx, criteria, request).await?;
        let total = table::count_rows::<Product>(&mut tx, criteria).await?;
        tx.commit().await?;

        let content = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(content, request, total))
    }

    async fn count_by_criteria(&self, criteria: &ProductCriteria) -> Result<i64, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let count = table::count_rows::<Product>(&mut tx, criteria).await?;
        tx.commit().await?;
        Ok(count)
    }
}
