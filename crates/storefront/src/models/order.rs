//! Order and order item domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use bite_core::{CustomerId, OrderId, OrderItemId, OrderLine, ProductId};

/// An order header.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer who placed the order.
    pub customer_id: CustomerId,
    /// Sum of `price * quantity` over the order's items.
    pub total_amount: Decimal,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// One line item of an order.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OrderItem {
    /// Unique line item ID.
    pub id: OrderItemId,
    /// Order this item belongs to.
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    /// Unit price as submitted by the client.
    pub price: Decimal,
}

impl OrderItem {
    /// Build a stored row from a submitted cart line.
    #[must_use]
    pub const fn from_line(id: OrderItemId, order_id: OrderId, line: &OrderLine) -> Self {
        Self {
            id,
            order_id,
            product_id: line.id,
            quantity: line.quantity,
            price: line.price,
        }
    }
}
