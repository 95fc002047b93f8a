//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (one `http_request` span per request)
//! 3. CORS (permissive, the API is called cross-origin by static pages)
//! 4. Request ID (correlation header recorded on the span)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
