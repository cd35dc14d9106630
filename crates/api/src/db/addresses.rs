//! Address repository.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use online_shop_core::criteria::AddressCriteria;
use online_shop_core::page::{Page, PageRequest};
use online_shop_core::{AddressId, CustomerId};

use super::filter::{push_range_filter, push_string_filter};
use super::table::{self, Table};
use super::{Repository, RepositoryError, begin_read_only};
use crate::models::{Address, Customer};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` address queries.
#[derive(Debug, sqlx::FromRow)]
pub struct AddressRow {
    id: i64,
    address1: Option<String>,
    address2: Option<String>,
    city: Option<String>,
    postcode: String,
    country: String,
    customer_id: Option<i64>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: Some(AddressId::new(row.id)),
            address1: row.address1,
            address2: row.address2,
            city: row.city,
            postcode: Some(row.postcode),
            country: Some(row.country),
            customer: Customer::from_id(row.customer_id.map(CustomerId::new)).map(Box::new),
        }
    }
}

impl Table for Address {
    type Row = AddressRow;

    const TABLE: &'static str = "address";
    const ALIAS: &'static str = "a";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "address1",
        "address2",
        "city",
        "postcode",
        "country",
        "customer_id",
    ];

    fn key(id: AddressId) -> i64 {
        id.as_i64()
    }

    fn push_criteria(qb: &mut QueryBuilder<'static, Postgres>, criteria: &AddressCriteria) {
        qb.push(" WHERE TRUE");

        if let Some(f) = &criteria.id {
            push_range_filter(qb, "a.id", f);
        }
        if let Some(f) = &criteria.address1 {
            push_string_filter(qb, "a.address1", f);
        }
        if let Some(f) = &criteria.address2 {
            push_string_filter(qb, "a.address2", f);
        }
        if let Some(f) = &criteria.city {
            push_string_filter(qb, "a.city", f);
        }
        if let Some(f) = &criteria.postcode {
            push_string_filter(qb, "a.postcode", f);
        }
        if let Some(f) = &criteria.country {
            push_string_filter(qb, "a.country", f);
        }
        if let Some(f) = &criteria.customer_id {
            push_range_filter(qb, "a.customer_id", f);
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for address database operations.
#[derive(Debug, Clone)]
pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(conn: &mut PgConnection, address: &Address) -> Result<AddressRow, RepositoryError> {
        let sql = format!(
            "INSERT INTO address (address1, address2, city, postcode, country, customer_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            table::columns::<Address>()
        );
        let row = sqlx::query_as::<_, AddressRow>(&sql)
            .bind(&address.address1)
            .bind(&address.address2)
            .bind(&address.city)
            .bind(&address.postcode)
            .bind(&address.country)
            .bind(customer_key(address))
            .fetch_one(conn)
            .await?;
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: AddressId,
        address: &Address,
    ) -> Result<Option<AddressRow>, RepositoryError> {
        let sql = format!(
            "UPDATE address SET address1 = $2, address2 = $3, city = $4, postcode = $5, \
             country = $6, customer_id = $7 WHERE id = $1 RETURNING {}",
            table::columns::<Address>()
        );
        let row = sqlx::query_as::<_, AddressRow>(&sql)
            .bind(id.as_i64())
            .bind(&address.address1)
            .bind(&address.address2)
            .bind(&address.city)
            .bind(&address.postcode)
            .bind(&address.country)
            .bind(customer_key(address))
            .fetch_optional(conn)
            .await?;
        Ok(row)
    }
}

fn customer_key(address: &Address) -> Option<i64> {
    address
        .customer
        .as_ref()
        .and_then(|c| c.id)
        .map(|id| id.as_i64())
}

#[async_trait]
impl Repository<Address> for AddressRepository {
    async fn save(&self, entity: Address) -> Result<Address, RepositoryError> {
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

    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let row = table::fetch_row::<Address>(&mut tx, id).await?;
        tx.commit().await?;
        Ok(row.map(Into::into))
    }

    async fn delete_by_id(&self, id: AddressId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        table::delete_row::<Address>(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_criteria(
        &self,
        criteria: &AddressCriteria,
        request: &PageRequest,
    ) -> Result<Page<Address>, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let rows = table::fetch_rows::<Address>(&mut tx, criteria, request).await?;
        let total = table::count_rows::<Address>(&mut tx, criteria).await?;
        tx.commit().await?;

        let content = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(content, request, total))
    }

    async fn count_by_criteria(&self, criteria: &AddressCriteria) -> Result<i64, RepositoryError> {
        let mut tx = begin_read_only(&self.pool).await?;
        let count = table::count_rows::<Address>(&mut tx, criteria).await?;
        tx.commit().await?;
        Ok(count)
    }
}
