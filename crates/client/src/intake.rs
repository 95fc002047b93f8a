//! Client for the order intake API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use bite_core::{
    ApiResponse, CartItem, CustomerCreated, CustomerForm, CustomerId, OrderId, OrderPlaced,
};

/// Errors that can occur when calling the intake service.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The request never got a response.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint URL could not be built.
    #[error("Invalid intake URL: {0}")]
    Url(#[from] url::ParseError),

    /// The service answered with a non-success HTTP status.
    ///
    /// `message` is the error envelope's message when the body has one, or
    /// the raw body otherwise.
    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The service answered 2xx but with an error envelope.
    #[error("Rejected: {0}")]
    Rejected(String),

    /// The response body was not the expected envelope.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl IntakeError {
    /// Whether the service rejected the input (4xx).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Status { status, .. } if status.is_client_error())
    }

    /// Whether the service failed to store the data (5xx).
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Status { status, .. } if status.is_server_error())
    }
}

/// The two remote steps of a checkout.
#[async_trait]
pub trait OrderIntake: Send + Sync {
    /// Create a customer and return its ID.
    async fn create_customer(&self, form: &CustomerForm) -> Result<CustomerId, IntakeError>;

    /// Place an order for `customer_id` and return its ID.
    async fn place_order(
        &self,
        customer_id: CustomerId,
        cart: &[CartItem],
    ) -> Result<OrderId, IntakeError>;
}

/// `PlaceOrder` request body.
#[derive(Serialize)]
struct OrderSubmission<'a> {
    customer_id: CustomerId,
    cart: &'a [CartItem],
}

/// HTTP client for the intake API.
///
/// No timeout is set: a checkout waits for as long as the service takes.
#[derive(Debug, Clone)]
pub struct HttpIntake {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpIntake {
    /// Create a client for the service at `base_url`.
    #[must_use]
    pub fn new(mut base_url: Url) -> Self {
        // Url::join replaces the last segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Base URL of the service.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST `body` as JSON and unwrap the response envelope.
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, IntakeError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiResponse<serde_json::Value>>(&text) {
                Ok(ApiResponse::Error { message }) => message,
                _ => text,
            };
            tracing::warn!(%status, %message, path, "intake request failed");
            return Err(IntakeError::Status { status, message });
        }

        serde_json::from_str::<ApiResponse<T>>(&text)?
            .into_result()
            .map_err(IntakeError::Rejected)
    }
}

#[async_trait]
impl OrderIntake for HttpIntake {
    #[instrument(skip_all)]
    async fn create_customer(&self, form: &CustomerForm) -> Result<CustomerId, IntakeError> {
        let created: CustomerCreated = self.post("api/customer", form).await?;
        Ok(created.customer_id)
    }

    #[instrument(skip(self, cart), fields(lines = cart.len()))]
    async fn place_order(
        &self,
        customer_id: CustomerId,
        cart: &[CartItem],
    ) -> Result<OrderId, IntakeError> {
        let placed: OrderPlaced = self
            .post("api/order", &OrderSubmission { customer_id, cart })
            .await?;
        Ok(placed.order_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Json, Router, http::StatusCode as AxumStatus, routing::post};
    use rust_decimal::Decimal;
    use serde_json::{Value, json};

    use bite_core::ProductId;

    use super::*;

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}").parse().unwrap()
    }

    fn form() -> CustomerForm {
        CustomerForm {
            first_name: Some("A".to_owned()),
            mobile_number: Some("999".to_owned()),
            address: Some("X".to_owned()),
            ..CustomerForm::default()
        }
    }

    fn cart() -> Vec<CartItem> {
        vec![CartItem {
            id: ProductId::new(1),
            name: "Cake".to_owned(),
            price: Decimal::from(100),
            quantity: 2,
        }]
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let intake = HttpIntake::new("http://localhost:5000/shop".parse().unwrap());
        assert_eq!(intake.base_url().as_str(), "http://localhost:5000/shop/");
    }

    #[tokio::test]
    async fn test_create_customer_sends_form_fields() {
        let router = Router::new().route(
            "/api/customer",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["FirstName"], "A");
                assert_eq!(body["MobileNumber"], "999");
                Json(json!({"status": "success", "customer_id": 7}))
            }),
        );
        let intake = HttpIntake::new(serve(router).await);

        let id = intake.create_customer(&form()).await.unwrap();
        assert_eq!(id, CustomerId::new(7));
    }

    #[tokio::test]
    async fn test_place_order_sends_cart() {
        let router = Router::new().route(
            "/api/order",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["customer_id"], 7);
                assert_eq!(body["cart"][0]["id"], 1);
                assert_eq!(body["cart"][0]["quantity"], 2);
                Json(json!({"status": "success", "order_id": 42}))
            }),
        );
        let intake = HttpIntake::new(serve(router).await);

        let id = intake.place_order(CustomerId::new(7), &cart()).await.unwrap();
        assert_eq!(id, OrderId::new(42));
    }

    #[tokio::test]
    async fn test_server_error_carries_envelope_message() {
        let router = Router::new().route(
            "/api/order",
            post(|| async {
                (
                    AxumStatus::INTERNAL_SERVER_ERROR,
                    Json(json!({"status": "error", "message": "connection refused"})),
                )
            }),
        );
        let intake = HttpIntake::new(serve(router).await);

        let err = intake
            .place_order(CustomerId::new(8), &cart())
            .await
            .unwrap_err();
        assert!(err.is_storage());
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error: connection refused");
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept() {
        let router = Router::new().route(
            "/api/customer",
            post(|| async { (AxumStatus::BAD_GATEWAY, "upstream down") }),
        );
        let intake = HttpIntake::new(serve(router).await);

        let err = intake.create_customer(&form()).await.unwrap_err();
        assert!(
            matches!(err, IntakeError::Status { status, ref message } if status == StatusCode::BAD_GATEWAY && message == "upstream down")
        );
    }

    #[tokio::test]
    async fn test_error_marker_on_success_status_is_rejected() {
        let router = Router::new().route(
            "/api/customer",
            post(|| async { Json(json!({"status": "error", "message": "nope"})) }),
        );
        let intake = HttpIntake::new(serve(router).await);

        let err = intake.create_customer(&form()).await.unwrap_err();
        assert!(matches!(err, IntakeError::Rejected(ref m) if m == "nope"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let intake = HttpIntake::new(format!("http://{addr}").parse().unwrap());
        let err = intake.create_customer(&form()).await.unwrap_err();
        assert!(matches!(err, IntakeError::Transport(_)));
    }
}
