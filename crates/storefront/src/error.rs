//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All API handlers return
//! `Result<T, AppError>`; errors are rendered as the JSON envelope
//! `{"status": "error", "message": ...}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use bite_core::ApiResponse;

use crate::services::IntakeError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Intake operation failed validation or storage.
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// Request body could not be read as JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Known path, wrong HTTP method.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Intake(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            Self::Intake(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }

        // Storage failures pass the underlying store message through
        let body: ApiResponse<()> = ApiResponse::error(self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bite_core::{CustomerForm, OrderValidationError};

    use super::*;
    use crate::db::RepositoryError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("/api/nope".to_string());
        assert_eq!(err.to_string(), "Not found: /api/nope");

        let err = AppError::Intake(IntakeError::InvalidOrder(OrderValidationError::EmptyCart));
        assert_eq!(err.to_string(), "Invalid order data: cart is empty");
    }

    #[test]
    fn test_app_error_status_codes() {
        let missing = CustomerForm::default().validate().unwrap_err();
        assert_eq!(
            get_status(AppError::Intake(missing.into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Intake(IntakeError::Storage(
                RepositoryError::Unavailable("connection refused".to_string())
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::MethodNotAllowed("GET /api/order".to_string())),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_storage_message_is_raw() {
        let err = AppError::Intake(IntakeError::Storage(RepositoryError::Unavailable(
            "connection refused".to_string(),
        )));
        assert_eq!(err.to_string(), "connection refused");
    }
}
