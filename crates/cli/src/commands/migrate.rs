//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shop-cli migrate
//! ```
//!
//! Migrations are stored in `crates/api/migrations/` and embedded at
//! compile time.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use super::CommandError;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails.
pub async fn run(database_url: &SecretString) -> Result<(), CommandError> {
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
