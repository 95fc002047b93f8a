//! Order intake service.
//!
//! Checkout is two independent calls from the client:
//!
//! 1. [`IntakeService::create_customer`] stores the customer and returns its ID.
//! 2. [`IntakeService::place_order`] stores the order header and its line items
//!    for that customer ID.
//!
//! Neither call is idempotent and nothing links them server-side: a customer
//! whose order never arrives (or fails) simply stays without orders. Retrying
//! a failed checkout creates a fresh customer row.

mod error;

use std::sync::Arc;

use tracing::instrument;

use bite_core::{CustomerForm, CustomerId, OrderId, OrderRequest};

pub use error::IntakeError;

use crate::db::IntakeStore;

/// Validates intake requests and writes them to the store.
#[derive(Clone)]
pub struct IntakeService {
    store: Arc<dyn IntakeStore>,
}

impl IntakeService {
    /// Create a new intake service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn IntakeStore>) -> Self {
        Self { store }
    }

    /// Validate and store a customer.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidCustomer` if first name, mobile number or
    /// address is missing; nothing is written in that case.
    /// Returns `IntakeError::Storage` if the insert fails.
    #[instrument(skip_all)]
    pub async fn create_customer(&self, form: CustomerForm) -> Result<CustomerId, IntakeError> {
        let customer = form.validate()?;
        let customer_id = self.store.insert_customer(&customer).await?;

        tracing::info!(%customer_id, "customer created");
        Ok(customer_id)
    }

    /// Validate an order, compute its total, and store header plus items.
    ///
    /// Prices and quantities are taken from the request as-is.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidOrder` if the customer ID is missing or the
    /// cart is absent, not a list, or empty; nothing is written in that case.
    /// Returns `IntakeError::Storage` if the order could not be stored.
    #[instrument(skip_all)]
    pub async fn place_order(&self, request: OrderRequest) -> Result<OrderId, IntakeError> {
        let order = request.validate()?;
        let order_id = self.store.insert_order(&order).await?;

        tracing::info!(
            %order_id,
            customer_id = %order.customer_id,
            total = %order.total,
            items = order.lines.len(),
            "order placed"
        );
        Ok(order_id)
    }

    /// Whether the store is reachable.
    pub async fn is_ready(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "intake store not reachable");
                false
            }
        }
    }
}
