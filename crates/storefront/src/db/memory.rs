//! In-process intake store.
//!
//! Mirrors the `PostgreSQL` store's behavior closely enough to exercise the
//! intake API without a database: sequential IDs, the customer foreign key on
//! orders, and all-or-nothing order writes. Failures can be injected at each
//! write step.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use bite_core::{CustomerId, NewCustomer, NewOrder, OrderId, OrderItemId};

use super::{IntakeStore, RepositoryError};
use crate::models::{Customer, Order, OrderItem};

/// A write step that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    /// The customer insert.
    Customer,
    /// The order header insert.
    OrderHeader,
    /// The bulk order items insert.
    OrderItems,
}

impl FailPoint {
    const fn message(self) -> &'static str {
        match self {
            Self::Customer => "injected failure: customers insert",
            Self::OrderHeader => "injected failure: orders insert",
            Self::OrderItems => "injected failure: order_items insert",
        }
    }
}

#[derive(Debug)]
struct Tables {
    customers: Vec<Customer>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    next_customer_id: i32,
    next_order_id: i32,
    next_item_id: i32,
    pending_failures: Vec<FailPoint>,
}

impl Tables {
    /// Consume a pending failure for `point`, if one was injected.
    fn take_failure(&mut self, point: FailPoint) -> Result<(), RepositoryError> {
        match self.pending_failures.iter().position(|p| *p == point) {
            Some(index) => {
                self.pending_failures.remove(index);
                Err(RepositoryError::Unavailable(point.message().to_owned()))
            }
            None => Ok(()),
        }
    }
}

/// Intake store held entirely in memory.
#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store whose IDs start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::with_next_ids(1, 1)
    }

    /// Create an empty store whose next customer and order IDs are given.
    #[must_use]
    pub fn with_next_ids(customer_id: i32, order_id: i32) -> Self {
        Self {
            tables: Mutex::new(Tables {
                customers: Vec::new(),
                orders: Vec::new(),
                order_items: Vec::new(),
                next_customer_id: customer_id,
                next_order_id: order_id,
                next_item_id: 1,
                pending_failures: Vec::new(),
            }),
        }
    }

    /// Make the next write at `point` fail.
    pub async fn fail_next(&self, point: FailPoint) {
        self.tables.lock().await.pending_failures.push(point);
    }

    /// Snapshot of the customers table.
    pub async fn customers(&self) -> Vec<Customer> {
        self.tables.lock().await.customers.clone()
    }

    /// Snapshot of the orders table.
    pub async fn orders(&self) -> Vec<Order> {
        self.tables.lock().await.orders.clone()
    }

    /// Snapshot of the order items table.
    pub async fn order_items(&self) -> Vec<OrderItem> {
        self.tables.lock().await.order_items.clone()
    }
}

#[async_trait]
impl IntakeStore for MemoryStore {
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<CustomerId, RepositoryError> {
        let mut tables = self.tables.lock().await;
        tables.take_failure(FailPoint::Customer)?;

        let id = CustomerId::new(tables.next_customer_id);
        tables.next_customer_id += 1;
        tables
            .customers
            .push(Customer::from_new(id, customer, Utc::now()));
        Ok(id)
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        let mut tables = self.tables.lock().await;
        tables.take_failure(FailPoint::OrderHeader)?;

        if !tables.customers.iter().any(|c| c.id == order.customer_id) {
            return Err(RepositoryError::Unavailable(format!(
                "insert on table \"orders\" violates foreign key constraint: customer {} does not exist",
                order.customer_id
            )));
        }

        // IDs are consumed even when the items fail, like a database sequence
        let order_id = OrderId::new(tables.next_order_id);
        tables.next_order_id += 1;

        tables.take_failure(FailPoint::OrderItems)?;

        let items: Vec<OrderItem> = order
            .lines
            .iter()
            .zip(tables.next_item_id..)
            .map(|(line, id)| OrderItem::from_line(OrderItemId::new(id), order_id, line))
            .collect();
        tables.next_item_id += i32::try_from(items.len()).unwrap_or(i32::MAX);

        tables.orders.push(Order {
            id: order_id,
            customer_id: order.customer_id,
            total_amount: order.total,
            created_at: Utc::now(),
        });
        tables.order_items.extend(items);
        Ok(order_id)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
