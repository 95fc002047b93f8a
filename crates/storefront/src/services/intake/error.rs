//! Intake error types.

use thiserror::Error;

use bite_core::{CustomerValidationError, OrderValidationError};

use crate::db::RepositoryError;

/// Errors that can occur while creating customers or placing orders.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Customer payload is missing required fields.
    #[error(transparent)]
    InvalidCustomer(#[from] CustomerValidationError),

    /// Order payload is missing a customer or has an unusable cart.
    #[error(transparent)]
    InvalidOrder(#[from] OrderValidationError),

    /// The store rejected or failed a write.
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl IntakeError {
    /// Whether the error was caused by the request rather than the store.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidCustomer(_) | Self::InvalidOrder(_))
    }
}
