//! Order repository for database operations.
//!
//! An order is written in two steps: the header row first, then all of its
//! line items in a single bulk insert keyed by the new header ID. Both steps
//! run inside one transaction.

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use bite_core::{NewOrder, OrderId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order header and its line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either insert fails, including a
    /// foreign key violation for an unknown customer. Nothing is committed in
    /// that case.
    #[instrument(skip(self, order), fields(customer_id = %order.customer_id, lines = order.lines.len()))]
    pub async fn create(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Order header
        let order_id = sqlx::query_scalar::<_, OrderId>(
            r"
            INSERT INTO orders (customer_id, total_amount)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(order.customer_id)
        .bind(order.total)
        .fetch_one(&mut *tx)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "order header insert failed"))?;

        // Line items, one row per cart entry
        let mut items = QueryBuilder::<Postgres>::new(
            "INSERT INTO order_items (order_id, product_id, quantity, price) ",
        );
        items.push_values(&order.lines, |mut row, line| {
            row.push_bind(order_id)
                .push_bind(line.id)
                .push_bind(line.quantity)
                .push_bind(line.price);
        });
        items
            .build()
            .execute(&mut *tx)
            .await
            .inspect_err(|e| {
                tracing::warn!(%order_id, error = %e, "order items insert failed, rolling back header");
            })?;

        tx.commit().await?;

        tracing::debug!(%order_id, total = %order.total, "order inserted");
        Ok(order_id)
    }

    /// Get an order header together with its line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_with_items(
        &self,
        id: OrderId,
    ) -> Result<Option<(Order, Vec<OrderItem>)>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, customer_id, total_amount, created_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItem>(
            r"
            SELECT id, order_id, product_id, quantity, price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some((order, items)))
    }

    /// List the IDs of every order placed by a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn ids_for_customer(
        &self,
        customer_id: bite_core::CustomerId,
    ) -> Result<Vec<OrderId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, OrderId>(
            "SELECT id FROM orders WHERE customer_id = $1 ORDER BY id",
        )
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }
}
