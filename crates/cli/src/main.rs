//! Online Shop CLI - Database migrations and sample data.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! shop-cli migrate
//!
//! # Insert a small sample catalogue
//! shop-cli seed
//! ```
//!
//! # Environment Variables
//!
//! - `SHOP_DATABASE_URL` - `PostgreSQL` connection string (or `--database-url`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Online shop CLI tools")]
struct Cli {
    /// `PostgreSQL` connection string
    #[arg(long, global = true, env = "SHOP_DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert sample customers, wish lists, products and categories
    Seed,
}

#[tokio::main]
async fn main() {
    // Load .env before parsing so `SHOP_DATABASE_URL` can come from it
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = commands::database_url(cli.database_url)?;
    match cli.command {
        Commands::Migrate => commands::migrate::run(&database_url).await?,
        Commands::Seed => {
            let summary = commands::seed::run(&database_url).await?;
            tracing::info!(
                customers = summary.customers,
                products = summary.products,
                categories = summary.categories,
                "Sample data inserted"
            );
        }
    }
    Ok(())
}
