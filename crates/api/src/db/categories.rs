//! Category repository.
//!
//! A category owns its many-to-many relation to products: saving a category
//! rewrites its `category_product` rows from the products it carries, and
//! every loaded category comes back with its products.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use online_shop_core::criteria::CategoryCriteria;
use online_shop_core::page::{Page, PageRequest};
use online_shop_core::{CategoryId, CategoryStatus};

use super::filter::{push_filter, push_range_filter, push_string_filter};
use super::products::ProductRow;
use super::table::{self, Table};
use super::{Repository, RepositoryError, begin_read_only};
use crate::models::{Category, Product};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` category queries.
#[derive(Debug, sqlx::FromRow)]
pub struct CategoryRow {
    id: i64,
    description: String,
    sort_order: Option<i32>,
    date_added: Option<NaiveDate>,
    date_modified: Option<NaiveDate>,
    status: Option<CategoryStatus>,
    parent_id: Option<i64>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: Some(CategoryId::new(row.id)),
            description: Some(row.description),
            sort_order: row.sort_order,
            date_added: row.date_added,
            date_modified: row.date_modified,
            status: row.status,
            parent: Self::from_id(row.parent_id.map(CategoryId::new)).map(Box::new),
            products: Vec::new(),
        }
    }
}

/// A product joined through `category_product`.
#[derive(Debug, sqlx::FromRow)]
struct CategoryProductRow {
    category_id: i64,
    #[sqlx(flatten)]
    product: ProductRow,
}

impl Table for Category {
    type Row = CategoryRow;

    const TABLE: &'static str = "category";
    const ALIAS: &'static str = "c";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "description",
        "sort_order",
        "date_added",
        "date_modified",
        "status",
        "parent_id",
    ];

    fn key(id: CategoryId) -> i64 {
        id.as_i64()
    }

    fn push_criteria(qb: &mut QueryBuilder<'static, Postgres>, criteria: &CategoryCriteria) {
        if criteria.product_id.is_some() {
            qb.push(" LEFT JOIN category_product cp ON cp.category_id = c.id");
        }
        qb.push(" WHERE TRUE");

        if let Some(f) = &criteria.id {
            push_range_filter(qb, "c.id", f);
        }
        if let Some(f) = &criteria.description {
            push_string_filter(qb, "c.description", f);
        }
        if let Some(f) = &criteria.sort_order {
            push_range_filter(qb, "c.sort_order", f);
        }
        if let Some(f) = &criteria.date_added {
            push_range_filter(qb, "c.date_added", f);
        }
        if let Some(f) = &criteria.date_modified {
            push_range_filter(qb, "c.date_modified", f);
        }
        if let Some(f) = &criteria.status {
            push_filter(qb, "c.status", f);
        }
        if let Some(f) = &criteria.parent_id {
            push_range_filter(qb, "c.parent_id", f);
        }
        if let Some(f) = &criteria.product_id {
            push_range_filter(qb, "cp.product_id", f);
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(conn: &mut PgConnection, category: &Category) -> Result<CategoryRow, RepositoryError> {
        let sql = format!(
            "INSERT INTO category \
             (description, sort_order, date_added, date_modified, status, parent_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            table::columns::<Category>()
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(&category.description)
            .bind(category.sort_order)
            .bind(category.date_added)
            .bind(category.date_modified)
            .bind(category.status)
            .bind(parent_key(category))
            .fetch_one(conn)
            .await?;
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: CategoryId,
        category: &Category,
    ) -> Result<Option<CategoryRow>, RepositoryError> {
        let sql = format!(
            "UPDATE category SET description = $2, sort_order = $3, date_added = $4, \
             date_modified = $5, status = $6, parent_id = $7 WHERE id = $1 RETURNING {}",
            table::columns::<Category>()
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(id.as_i64())
            .bind(&category.description)
            .bind(category.sort_order)
            .bind(category.date_added)
            .bind(category.date_modified)
            .bind(category.status)
            .bind(parent_key(category))
            .fetch_optional(conn)
            .await?;
        Ok(row)
    }

    /// Replace the product links of a category. Products without an id are
    /// skipped.
    async fn replace_products(
        conn: &mut PgConnection,
        category_id: i64,
        products: &[Product],
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM category_product WHERE category_id = $1")
            .bind(category_id)
            .execute(&mut *conn)
            .await?;

        let product_ids: Vec<i64> = products
            .iter()
            .filter_map(|p| p.id)
            .map(|id| id.as_i64())
            .collect();
        if product_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO category_product (category_id, product_id) \
             SELECT $1, UNNEST($2::bigint[]) ON CONFLICT DO NOTHING",
        )
        .bind(category_id)
        .bind(&product_ids)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Load the products of the given categories, keyed by category id.
    async fn load_products(
        conn: &mut PgConnection,
        category_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Product>>, RepositoryError> {
        if category_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT cp.category_id, {} FROM category_product cp \
             JOIN product p ON p.id = cp.product_id \
             WHERE cp.category_id = ANY($1) ORDER BY p.id",
            table::qualified_columns::<Product>()
        );
        let rows = sqlx::query_as::<_, CategoryProductRow>(&sql)
            .bind(category_ids)
            .fetch_all(conn)
            .await?;

        let mut by_category: HashMap<i64, Vec<Product>> = HashMap::new();
        for row in rows {
            by_category
                .entry(row.category_id)
                .or_default()
                .push(row.product.into());
        }
        Ok(by_category)
    }

    /// Convert rows and attach their products.
    async fn with_products(
        conn: &mut PgConnection,
        rows: Vec<CategoryRow>,
    ) -> Result<Vec<Category>, RepositoryError> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut products = Self::load_products(conn, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                let mut category = Category::from(row);
                category.products = products.remove(&id).unwrap_or_default();
                category
            })
            .collect())
    }
}

fn parent_key(category: &Category) -> Option<i64> {
    category
        .parent
        .as_ref()
        .and_then(|p| p.id)
        .map(|id| id.as_i64())
}

#[async_trait]
impl Repository<Category> for CategoryRepository {
    async fn save(&self, entity: Category) -> Result<Category, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = match entity.id {
            Some(id) => Self::update(&mut tx, id, &entity).await?,
            None => None,
        };
        let row = match updated {
            Some(row) => row,
            None => Self::insert(&mut tx, &entity).await?,
        };
        Self::replace_products(&mut tx, row.id, &entity.products).await?;
        let saved = Self::with_products(&mut tx, vec![row]).await?;

        tx.commit().await?;
        saved
            .into_iter()
            .next()
            .ok_or(RepositoryError::Database(sqlx::Error::RowNotFound))
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let row = table::fetch_row::<Category>(&mut tx, id).await?;
        let category = match row {
            Some(row) => Self::with_products(&mut tx, vec![row]).await?.into_iter().next(),
            None => None,
        };
        tx.commit().await?;
        Ok(category)
    }

    async fn delete_by_id(&self, id: CategoryId) -> Result<(), RepositoryError> {
        // `category_product` rows go with the category (ON DELETE CASCADE)
        let mut tx = self.pool.begin().await?;
        table::delete_row::<Category>(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_criteria(
        &self,
        criteria: &CategoryCriteria,
        request: &PageRequest,
    ) -> Result<Page<Category>, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let rows = table::fetch_rows::<Category>(&mut tx, criteria, request).await?;
        let total = table::count_rows::<Category>(&mut tx, criteria).await?;
        let content = Self::with_products(&mut tx, rows).await?;
        tx.commit().await?;

        Ok(Page::new(content, request, total))
    }

    async fn count_by_criteria(&self, criteria: &CategoryCriteria) -> Result<i64, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let count = table::count_rows::<Category>(&mut tx, criteria).await?;
        tx.commit().await?;
        Ok(count)
    }
}
