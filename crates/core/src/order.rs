//! Order placement payloads and total computation.
//!
//! The intake service trusts the prices sent by the cart client. The order
//! total is computed from those prices, never re-read from a catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{CustomerId, ProductId, line_total};

/// Errors produced when validating an [`OrderRequest`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    /// `customer_id` is absent, null, zero, or otherwise falsy.
    #[error("Invalid order data: customer_id is required")]
    MissingCustomer,
    /// `customer_id` is present but is not a positive integer.
    #[error("Invalid order data: customer_id must be a positive integer")]
    InvalidCustomer,
    /// `cart` is absent or not a list.
    #[error("Invalid order data: cart must be a list")]
    CartNotList,
    /// `cart` is an empty list.
    #[error("Invalid order data: cart is empty")]
    EmptyCart,
    /// A cart entry could not be read as `{id, price, quantity}`.
    #[error("Invalid order data: cart item {index}: {reason}")]
    InvalidLine { index: usize, reason: String },
    /// The order total does not fit in a decimal.
    #[error("Invalid order data: order total overflows")]
    TotalOverflow,
}

/// One line of a submitted cart.
///
/// Extra fields sent by the client (such as the display name) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product identifier.
    pub id: ProductId,
    /// Unit price as captured by the client.
    pub price: Decimal,
    /// Quantity, accepted as given (zero and negative values included).
    pub quantity: i32,
}

/// Raw `PlaceOrder` request body.
///
/// Both fields are kept loosely typed so that a malformed request is reported
/// as a validation failure rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub customer_id: Option<Value>,
    #[serde(default)]
    pub cart: Option<Value>,
}

/// A validated order ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
}

/// Sum of `price * quantity` over every line.
///
/// Returns `None` on decimal overflow.
#[must_use]
pub fn order_total(lines: &[OrderLine]) -> Option<Decimal> {
    lines.iter().try_fold(Decimal::ZERO, |sum, line| {
        sum.checked_add(line_total(line.price, line.quantity)?)
    })
}

impl OrderRequest {
    /// Validate the request and compute the order total.
    ///
    /// The customer is not looked up; a dangling `customer_id` is left for the
    /// store's foreign key to reject.
    ///
    /// # Errors
    ///
    /// Returns [`OrderValidationError`] if the customer id is missing or not
    /// positive, or if the cart is absent, not a list, empty, or has an
    /// unreadable entry.
    pub fn validate(self) -> Result<NewOrder, OrderValidationError> {
        let customer_id = parse_customer_id(self.customer_id.as_ref())?;

        let items = match self.cart {
            Some(Value::Array(items)) => items,
            _ => return Err(OrderValidationError::CartNotList),
        };
        if items.is_empty() {
            return Err(OrderValidationError::EmptyCart);
        }

        let lines = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<OrderLine>(item).map_err(|e| {
                    OrderValidationError::InvalidLine {
                        index,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = order_total(&lines).ok_or(OrderValidationError::TotalOverflow)?;

        Ok(NewOrder {
            customer_id,
            lines,
            total,
        })
    }
}

/// Interpret a JSON `customer_id`.
///
/// Falsy values (`null`, `0`, `""`, `false`) count as missing. Integers and
/// integer strings are accepted when positive.
fn parse_customer_id(value: Option<&Value>) -> Result<CustomerId, OrderValidationError> {
    let id = match value {
        None | Some(Value::Null | Value::Bool(false)) => {
            return Err(OrderValidationError::MissingCustomer);
        }
        Some(Value::String(s)) if s.is_empty() => {
            return Err(OrderValidationError::MissingCustomer);
        }
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {
            return Err(OrderValidationError::MissingCustomer);
        }
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    id.and_then(|id| i32::try_from(id).ok())
        .map(CustomerId::new)
        .filter(CustomerId::is_positive)
        .ok_or(OrderValidationError::InvalidCustomer)
}
