//! Checkout progress, outcome and errors.
//!
//! A checkout walks through these stages:
//!
//! ```text
//! NotStarted ──► CustomerSubmitted ──► OrderSubmitted ──► Complete
//!                       │                     │
//!                       └────► Failed ◄───────┘
//! ```
//!
//! `Failed` is terminal for that submission.
//!
//! There is no compensation: when the order step fails, the customer created
//! in the first step stays in the store, and a retry starts over with a new
//! customer.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use bite_core::{CustomerId, OrderId};

use crate::intake::IntakeError;

/// Where a checkout is in its two-call sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    NotStarted,
    /// The customer request has been sent.
    CustomerSubmitted,
    /// The customer exists and the order request has been sent.
    OrderSubmitted,
    Complete,
    Failed,
}

impl CheckoutStage {
    /// The stage reached when the current one succeeds.
    #[must_use]
    pub const fn advance(self) -> Self {
        match self {
            Self::NotStarted => Self::CustomerSubmitted,
            Self::CustomerSubmitted => Self::OrderSubmitted,
            Self::OrderSubmitted | Self::Complete => Self::Complete,
            Self::Failed => Self::Failed,
        }
    }

    /// The stage reached when the request sent in the current one fails.
    #[must_use]
    pub const fn fail(self) -> Self {
        match self {
            Self::CustomerSubmitted | Self::OrderSubmitted | Self::Failed => Self::Failed,
            Self::NotStarted | Self::Complete => self,
        }
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not started",
            Self::CustomerSubmitted => "customer submitted",
            Self::OrderSubmitted => "order submitted",
            Self::Complete => "complete",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Page the client shows next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Home,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Login => "login",
            Self::Home => "home",
        })
    }
}

/// Outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub customer_id: CustomerId,
    pub order_id: OrderId,
    /// Cart total at submission time.
    pub total: Decimal,
    /// View to move to after the order.
    pub next_view: View,
}

/// Errors that abort a checkout.
///
/// In every case the cart is left as it was.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order; no request was sent.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// Required form fields are blank; no request was sent.
    #[error("Please fill in: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A remote step failed.
    ///
    /// `stage` is the stage the checkout had reached; `customer_id` is set
    /// when the customer was already created.
    #[error("Checkout failed ({stage}): {source}")]
    Remote {
        stage: CheckoutStage,
        customer_id: Option<CustomerId>,
        #[source]
        source: IntakeError,
    },
}

impl CheckoutError {
    /// Whether the service failed to store the data (a 5xx answer).
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::Remote { source, .. } if source.is_storage())
    }

    /// Stage the submission ended in: `NotStarted` when nothing was sent,
    /// `Failed` once a request was.
    #[must_use]
    pub const fn stage(&self) -> CheckoutStage {
        match self {
            Self::EmptyCart | Self::MissingFields(_) => CheckoutStage::NotStarted,
            Self::Remote { stage, .. } => stage.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_progression() {
        let mut stage = CheckoutStage::NotStarted;
        let mut seen = vec![stage];
        while stage != CheckoutStage::Complete {
            stage = stage.advance();
            seen.push(stage);
        }

        assert_eq!(
            seen,
            vec![
                CheckoutStage::NotStarted,
                CheckoutStage::CustomerSubmitted,
                CheckoutStage::OrderSubmitted,
                CheckoutStage::Complete,
            ]
        );
        assert_eq!(CheckoutStage::Failed.advance(), CheckoutStage::Failed);
    }

    #[test]
    fn test_failure_branches() {
        assert_eq!(CheckoutStage::CustomerSubmitted.fail(), CheckoutStage::Failed);
        assert_eq!(CheckoutStage::OrderSubmitted.fail(), CheckoutStage::Failed);
        assert_eq!(CheckoutStage::NotStarted.fail(), CheckoutStage::NotStarted);
        assert_eq!(CheckoutStage::Complete.fail(), CheckoutStage::Complete);
        assert_eq!(CheckoutError::EmptyCart.stage(), CheckoutStage::NotStarted);
    }

    #[test]
    fn test_missing_fields_message() {
        let err = CheckoutError::MissingFields(vec!["FirstName", "Address"]);
        assert_eq!(err.to_string(), "Please fill in: FirstName, Address");
    }

    #[test]
    fn test_view_names() {
        assert_eq!(View::Home.to_string(), "home");
        assert_eq!(View::Login.to_string(), "login");
    }
}
