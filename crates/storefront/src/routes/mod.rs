//! HTTP routes for the order intake service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Store reachability check
//!
//! # Intake API (JSON)
//! POST /api/customer           - Create a customer, returns customer_id
//! POST /api/order              - Place an order, returns order_id
//! *    /api/*                  - JSON 404 envelope (405 for a wrong method)
//!
//! # Site
//! GET  /                       - Entry page (login.html)
//! GET  /*                      - Static file, or the entry page if none exists
//! ```

pub mod api;
pub mod health;
pub mod site;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::{middleware::request_id_middleware, state::AppState};

/// Create the intake API router, nested under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/customer", post(api::create_customer))
        .route("/order", post(api::place_order))
        .method_not_allowed_fallback(api::method_not_allowed)
        .fallback(api::not_found)
}

/// Build the full application: health checks, the intake API, the static
/// site, and the tracing/CORS/request-id layers.
///
/// Sentry layers are added by the binary on top of this router.
pub fn app(state: AppState) -> Router {
    let site = site::site_service(state.site());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .route_service("/", site::entry_page(state.site()))
        .fallback_service(site)
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
