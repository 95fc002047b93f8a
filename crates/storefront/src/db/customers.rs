//! Customer repository for database operations.

use sqlx::PgPool;
use tracing::instrument;

use bite_core::{CustomerId, NewCustomer};

use super::RepositoryError;
use crate::models::Customer;

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a customer and return the assigned ID.
    ///
    /// Not idempotent: identical input creates a new row every time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, customer))]
    pub async fn create(&self, customer: &NewCustomer) -> Result<CustomerId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CustomerId>(
            r"
            INSERT INTO customers (firstname, lastname, mobilenumber, pincode, address, email)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.mobile_number)
        .bind(&customer.pin_code)
        .bind(&customer.address)
        .bind(&customer.email)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(customer_id = %id, "customer inserted");
        Ok(id)
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, firstname, lastname, mobilenumber, pincode, address, email, created_at
            FROM customers
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }
}
