//! Database operations for the order intake `PostgreSQL` store.
//!
//! # Database: `bite_storefront`
//!
//! ## Tables
//!
//! - `customers` - One row per checkout attempt (no uniqueness constraint)
//! - `orders` - Order headers, `customer_id` references `customers`
//! - `order_items` - Line items, `order_id` references `orders`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p bite-cli -- migrate
//! ```

pub mod customers;
#[cfg(any(test, feature = "memory-store"))]
pub mod memory;
pub mod orders;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use bite_core::{CustomerId, NewCustomer, NewOrder, OrderId};

pub use customers::CustomerRepository;
#[cfg(any(test, feature = "memory-store"))]
pub use memory::{FailPoint, MemoryStore};
pub use orders::OrderRepository;

/// Errors that can occur during repository operations.
///
/// The display text is the underlying store message, which the intake API
/// returns to the caller unchanged.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Storage failure reported by a non-SQL store.
    #[error("{0}")]
    Unavailable(String),
}

/// Persistence operations behind the intake API.
#[async_trait]
pub trait IntakeStore: Send + Sync {
    /// Insert one customer row and return its new ID.
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerId, RepositoryError>;

    /// Insert an order header, then one item row per order line.
    ///
    /// Items are only written once the header exists. Both writes commit
    /// together: if the items fail, the header is not kept.
    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// `PostgreSQL`-backed intake store.
#[derive(Debug, Clone)]
pub struct PgIntakeStore {
    pool: PgPool,
}

impl PgIntakeStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IntakeStore for PgIntakeStore {
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerId, RepositoryError> {
        CustomerRepository::new(&self.pool).create(customer).await
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        OrderRepository::new(&self.pool).create(order).await
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool.
///
/// The intake service talks to the database over a single connection by
/// default; `max_connections` raises that limit.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on open connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
