//! Database operations for the online shop `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `customer` - Shop customers
//! - `address` - Postal addresses, owned by a customer
//! - `wish_list` - Wish lists, owned by a customer
//! - `product` - Products, optionally on one wish list
//! - `category` - Category tree (`parent_id`)
//! - `category_product` - Many-to-many join between categories and products
//!
//! # Transactions
//!
//! Every repository call runs in exactly one transaction. Reads open it with
//! [`begin_read_only`], writes with `pool.begin()`. Dropping a transaction
//! without `commit()` rolls it back, so any `?` inside a write undoes it.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p online-shop-cli -- migrate
//! ```

mod addresses;
mod categories;
mod customers;
mod filter;
#[cfg(test)]
pub mod memory;
mod products;
mod table;
mod wish_lists;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;

use online_shop_core::page::{Page, PageRequest};

use crate::models::Entity;

pub use addresses::AddressRepository;
pub use categories::CategoryRepository;
pub use customers::CustomerRepository;
pub use products::ProductRepository;
pub use wish_lists::WishListRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations for one entity type.
///
/// `save` inserts when the entity has no id and updates otherwise. Updating
/// an id that no longer exists inserts a new row with a freshly generated
/// id, so the returned entity may carry a different id than the one passed
/// in.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert or update `entity`, returning it as persisted.
    async fn save(&self, entity: E) -> Result<E, RepositoryError>;

    /// Load one entity by id.
    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, RepositoryError>;

    /// Delete by id. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: E::Id) -> Result<(), RepositoryError>;

    /// One page of entities matching every filter in `criteria`.
    async fn find_by_criteria(
        &self,
        criteria: &E::Criteria,
        request: &PageRequest,
    ) -> Result<Page<E>, RepositoryError>;

    /// Number of entities matching every filter in `criteria`.
    async fn count_by_criteria(&self, criteria: &E::Criteria) -> Result<i64, RepositoryError>;

    /// One page of all entities.
    async fn find_all(&self, request: &PageRequest) -> Result<Page<E>, RepositoryError> {
        self.find_by_criteria(&E::Criteria::default(), request)
            .await
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Begin a read-only transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if no connection is available or the
/// transaction cannot be started.
pub async fn begin_read_only(
    pool: &PgPool,
) -> Result<Transaction<'static, Postgres>, RepositoryError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}
