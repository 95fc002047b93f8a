//! Intake API handlers.
//!
//! Both endpoints answer with the `{status, ...}` JSON envelope. Validation
//! failures are 400s; storage failures are 500s carrying the store's message.

use axum::{
    Json,
    extract::{OriginalUri, State, rejection::JsonRejection},
    http::Method,
};
use tracing::instrument;

use bite_core::{ApiResponse, CustomerCreated, CustomerForm, OrderPlaced, OrderRequest};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create a customer.
///
/// `POST /api/customer` with `{FirstName, LastName, MobileNumber, PinCode,
/// Address, EmailId}`.
#[instrument(skip(state, payload))]
pub async fn create_customer(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CustomerForm>, JsonRejection>,
) -> Result<Json<ApiResponse<CustomerCreated>>> {
    let Json(form) = payload?;
    let customer_id = state.intake().create_customer(form).await?;

    Ok(Json(ApiResponse::Success(CustomerCreated { customer_id })))
}

/// Place an order for an existing customer.
///
/// `POST /api/order` with `{customer_id, cart: [{id, price, quantity}, ...]}`.
#[instrument(skip(state, payload))]
pub async fn place_order(
    State(state): State<AppState>,
    payload: std::result::Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<OrderPlaced>>> {
    let Json(request) = payload?;
    let order_id = state.intake().place_order(request).await?;

    Ok(Json(ApiResponse::Success(OrderPlaced { order_id })))
}

/// Fallback for unknown `/api/*` paths.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}

/// Fallback for a known `/api/*` path called with the wrong method.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::MethodNotAllowed(format!("{method} {}", uri.path()))
}
