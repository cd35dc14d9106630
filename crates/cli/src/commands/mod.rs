//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error while seeding.
    #[error("Repository error: {0}")]
    Repository(#[from] online_shop_api::db::RepositoryError),
}

/// Database URL from the command line or `SHOP_DATABASE_URL`, falling back
/// to `DATABASE_URL`.
///
/// # Errors
///
/// Returns `CommandError::MissingEnvVar` if neither is set.
pub fn database_url(explicit: Option<String>) -> Result<SecretString, CommandError> {
    explicit
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .map(SecretString::from)
        .ok_or(CommandError::MissingEnvVar("SHOP_DATABASE_URL"))
}
