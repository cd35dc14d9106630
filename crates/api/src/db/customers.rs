//! Customer repository.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use online_shop_core::CustomerId;
use online_shop_core::criteria::CustomerCriteria;
use online_shop_core::page::{Page, PageRequest};

use super::filter::{push_range_filter, push_string_filter};
use super::table::{self, Table};
use super::{Repository, RepositoryError, begin_read_only};
use crate::models::Customer;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` customer queries.
#[derive(Debug, sqlx::FromRow)]
pub struct CustomerRow {
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    telephone: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: Some(CustomerId::new(row.id)),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            telephone: row.telephone,
            wish_lists: Vec::new(),
            addresses: Vec::new(),
        }
    }
}

impl Table for Customer {
    type Row = CustomerRow;

    const TABLE: &'static str = "customer";
    const ALIAS: &'static str = "c";
    const COLUMNS: &'static [&'static str] =
        &["id", "first_name", "last_name", "email", "telephone"];

    fn key(id: CustomerId) -> i64 {
        id.as_i64()
    }

    fn push_criteria(qb: &mut QueryBuilder<'static, Postgres>, criteria: &CustomerCriteria) {
        if criteria.wish_list_id.is_some() {
            qb.push(" LEFT JOIN wish_list wl ON wl.customer_id = c.id");
        }
        if criteria.address_id.is_some() {
            qb.push(" LEFT JOIN address a ON a.customer_id = c.id");
        }
        qb.push(" WHERE TRUE");

        if let Some(f) = &criteria.id {
            push_range_filter(qb, "c.id", f);
        }
        if let Some(f) = &criteria.first_name {
            push_string_filter(qb, "c.first_name", f);
        }
        if let Some(f) = &criteria.last_name {
            push_string_filter(qb, "c.last_name", f);
        }
        if let Some(f) = &criteria.email {
            push_string_filter(qb, "c.email", f);
        }
        if let Some(f) = &criteria.telephone {
            push_string_filter(qb, "c.telephone", f);
        }
        if let Some(f) = &criteria.wish_list_id {
            push_range_filter(qb, "wl.id", f);
        }
        if let Some(f) = &criteria.address_id {
            push_range_filter(qb, "a.id", f);
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(conn: &mut PgConnection, customer: &Customer) -> Result<CustomerRow, RepositoryError> {
        let sql = format!(
            "INSERT INTO customer (first_name, last_name, email, telephone) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            table::columns::<Customer>()
        );
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .bind(&customer.email)
            .bind(&customer.telephone)
            .fetch_one(conn)
            .await?;
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: CustomerId,
        customer: &Customer,
    ) -> Result<Option<CustomerRow>, RepositoryError> {
        let sql = format!(
            "UPDATE customer SET first_name = $2, last_name = $3, email = $4, telephone = $5 \
             WHERE id = $1 RETURNING {}",
            table::columns::<Customer>()
        );
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(id.as_i64())
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .bind(&customer.email)
            .bind(&customer.telephone)
            .fetch_optional(conn)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl Repository<Customer> for CustomerRepository {
    async fn save(&self, entity: Customer) -> Result<Customer, RepositoryError> {
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

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let row = table::fetch_row::<Customer>(&mut tx, id).await?;
        tx.commit().await?;
        Ok(row.map(Into::into))
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        table::delete_row::<Customer>(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_criteria(
        &self,
        criteria: &CustomerCriteria,
        request: &PageRequest,
    ) -> Result<Page<Customer>, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let rows = table::fetch_rows::<Customer>(&mut tx, criteria, request).await?;
        let total = table::count_rows::<Customer>(&mut tx, criteria).await?;
        tx.commit().await?;

        let content = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(content, request, total))
    }

    async fn count_by_criteria(&self, criteria: &CustomerCriteria) -> Result<i64, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let count = table::count_rows::<Customer>(&mut tx, criteria).await?;
        tx.commit().await?;
        Ok(count)
    }
}
