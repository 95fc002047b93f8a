//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bite migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string for the intake store
//!
//! # Migration Files
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded into
//! the binary at build time:
//! ```text
//! migrations/
//! ├── 20260301000001_create_customers.sql
//! ├── 20260301000002_create_orders.sql
//! └── 20260301000003_create_order_items.sql
//! ```

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the intake store migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration
/// fails.
pub async fn run(database_url: &SecretString) -> Result<(), MigrationError> {
    tracing::info!("Connecting to storefront database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Storefront migrations complete");

    #[allow(clippy::print_stdout)]
    {
        println!("Migrations applied.");
    }
    Ok(())
}
