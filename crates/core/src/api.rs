//! JSON response envelope shared by the intake service and its clients.
//!
//! Every response body carries a `status` marker:
//!
//! ```text
//! {"status": "success", "customer_id": 7}
//! {"status": "success", "order_id": 42}
//! {"status": "error", "message": "Missing required fields: Address"}
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, OrderId};

/// Response body of an intake endpoint.
///
/// `T` is flattened next to the `status` marker, so it must serialize as a
/// JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success(T),
    Error { message: String },
}

impl<T> ApiResponse<T> {
    /// Build an error envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Convert into a `Result`, taking the error message on failure.
    ///
    /// # Errors
    ///
    /// Returns the message of an `Error` envelope.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error { message } => Err(message),
        }
    }
}

/// Success payload of `CreateCustomer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreated {
    pub customer_id: CustomerId,
}

/// Success payload of `PlaceOrder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
}
