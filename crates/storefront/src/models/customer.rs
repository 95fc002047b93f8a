//! Customer domain types.

use chrono::{DateTime, Utc};

use bite_core::{CustomerId, NewCustomer};

/// A stored customer.
///
/// One row is created per checkout attempt; the same mobile number may
/// appear on many rows.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    #[sqlx(rename = "firstname")]
    pub first_name: String,
    #[sqlx(rename = "lastname")]
    pub last_name: Option<String>,
    #[sqlx(rename = "mobilenumber")]
    pub mobile_number: String,
    #[sqlx(rename = "pincode")]
    pub pin_code: Option<String>,
    pub address: String,
    pub email: Option<String>,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Build a stored row from validated input.
    #[must_use]
    pub fn from_new(id: CustomerId, customer: &NewCustomer, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            mobile_number: customer.mobile_number.clone(),
            pin_code: customer.pin_code.clone(),
            address: customer.address.clone(),
            email: customer.email.clone(),
            created_at,
        }
    }
}
