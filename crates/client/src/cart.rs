//! Durable cart with checkout.

use tracing::instrument;

use bite_core::{Cart, CartView, CustomerForm, Product, ProductId};

use crate::checkout::{CheckoutError, CheckoutReceipt, CheckoutStage, View};
use crate::intake::OrderIntake;
use crate::storage::{LocalStorage, StorageError};

/// Storage key holding the cart.
pub const CART_KEY: &str = "cart";

/// Cart state owned by the client, persisted under [`CART_KEY`].
///
/// Every mutation is written to storage before it becomes visible: if the
/// write fails, the cart keeps its previous contents.
#[derive(Debug)]
pub struct CartClient {
    cart: Cart,
    storage: LocalStorage,
}

impl CartClient {
    /// Load the cart from `storage`; an absent key is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Json` if the stored cart is malformed.
    pub fn load(storage: LocalStorage) -> Result<Self, StorageError> {
        let cart = storage.get::<Cart>(CART_KEY)?.unwrap_or_default();
        Ok(Self { cart, storage })
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Number of units in the cart, as shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Add one unit of `product` and return the new item count.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    pub fn add_item(&mut self, product: Product) -> Result<u32, StorageError> {
        let mut next = self.cart.clone();
        let quantity = next.add(product);
        self.save(next)?;

        tracing::debug!(quantity, items = self.item_count(), "item added to cart");
        Ok(self.item_count())
    }

    /// Remove every entry for `id` and return the re-rendered cart.
    ///
    /// Removing a product that is not in the cart changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    pub fn remove_item(&mut self, id: ProductId) -> Result<CartView, StorageError> {
        let mut next = self.cart.clone();
        if next.remove(id) {
            self.save(next)?;
        }
        Ok(self.render())
    }

    /// Empty the cart and return the empty view.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    pub fn clear(&mut self) -> Result<CartView, StorageError> {
        self.save(Cart::new())?;
        Ok(self.render())
    }

    /// Per-line subtotals and the cart total.
    #[must_use]
    pub fn render(&self) -> CartView {
        self.cart.render()
    }

    /// Submit the cart as an order.
    ///
    /// Sends the customer, then the order for the returned customer ID. The
    /// cart is cleared only after both calls succeed.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::EmptyCart` or `CheckoutError::MissingFields` before
    ///   any request is sent
    /// - `CheckoutError::Remote` if either call fails; the cart is untouched
    #[instrument(skip_all, fields(items = self.cart.item_count()))]
    pub async fn checkout<I>(
        &mut self,
        form: &CustomerForm,
        intake: &I,
    ) -> Result<CheckoutReceipt, CheckoutError>
    where
        I: OrderIntake + ?Sized,
    {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let form = form.trimmed();
        let missing = form.missing_required();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        let total = self.cart.total();
        let mut stage = CheckoutStage::NotStarted.advance();

        let customer_id =
            intake
                .create_customer(&form)
                .await
                .map_err(|source| CheckoutError::Remote {
                    stage,
                    customer_id: None,
                    source,
                })?;
        stage = stage.advance();
        tracing::debug!(%customer_id, %stage, "customer created");

        let order_id = intake
            .place_order(customer_id, self.cart.items())
            .await
            .map_err(|source| {
                tracing::warn!(%customer_id, "order failed, customer kept without order");
                CheckoutError::Remote {
                    stage,
                    customer_id: Some(customer_id),
                    source,
                }
            })?;
        stage = stage.advance();
        tracing::info!(%customer_id, %order_id, %total, %stage, "checkout complete");

        // The order exists now: a failed save must not turn into a retry
        if let Err(e) = self.save(Cart::new()) {
            tracing::warn!(error = %e, "order placed but the saved cart could not be cleared");
            self.cart = Cart::new();
        }

        Ok(CheckoutReceipt {
            customer_id,
            order_id,
            total,
            next_view: View::Home,
        })
    }

    fn save(&mut self, cart: Cart) -> Result<(), StorageError> {
        self.storage.set(CART_KEY, &cart)?;
        self.cart = cart;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use rust_decimal::Decimal;

    use bite_core::{CartItem, CustomerId, OrderId};

    use super::*;
    use crate::intake::IntakeError;

    /// Scripted intake that records every call.
    #[derive(Default)]
    struct FakeIntake {
        customer_result: Option<i32>,
        order_result: Option<i32>,
        calls: Mutex<Vec<String>>,
        submitted: Mutex<Vec<CartItem>>,
    }

    impl FakeIntake {
        fn succeeding(customer_id: i32, order_id: i32) -> Self {
            Self {
                customer_result: Some(customer_id),
                order_result: Some(order_id),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn storage_failure() -> IntakeError {
        IntakeError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "relation \"orders\" is unavailable".to_owned(),
        }
    }

    #[async_trait]
    impl OrderIntake for FakeIntake {
        async fn create_customer(&self, _form: &CustomerForm) -> Result<CustomerId, IntakeError> {
            self.calls.lock().unwrap().push("customer".to_owned());
            self.customer_result
                .map(CustomerId::new)
                .ok_or_else(storage_failure)
        }

        async fn place_order(
            &self,
            customer_id: CustomerId,
            cart: &[CartItem],
        ) -> Result<OrderId, IntakeError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("order:{customer_id}"));
            self.submitted.lock().unwrap().extend_from_slice(cart);
            self.order_result.map(OrderId::new).ok_or_else(storage_failure)
        }
    }

    fn product(id: i32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::from(price),
        }
    }

    fn form() -> CustomerForm {
        CustomerForm {
            first_name: Some("A".to_owned()),
            mobile_number: Some("999".to_owned()),
            address: Some("X".to_owned()),
            ..CustomerForm::default()
        }
    }

    fn client_with_two_lines() -> CartClient {
        let mut client = CartClient::load(LocalStorage::ephemeral()).unwrap();
        client.add_item(product(1, 100)).unwrap();
        client.add_item(product(1, 100)).unwrap();
        client.add_item(product(2, 50)).unwrap();
        client
    }

    #[test]
    fn test_add_item_twice_gives_one_entry() {
        let mut client = CartClient::load(LocalStorage::ephemeral()).unwrap();
        assert_eq!(client.add_item(product(1, 100)).unwrap(), 1);
        assert_eq!(client.add_item(product(1, 100)).unwrap(), 2);

        assert_eq!(client.cart().items().len(), 1);
        assert_eq!(client.cart().items()[0].quantity, 2);
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut client = client_with_two_lines();
        let before = client.cart().clone();

        let view = client.remove_item(ProductId::new(99)).unwrap();
        assert_eq!(client.cart(), &before);
        assert_eq!(view.total, "250.00");
    }

    #[test]
    fn test_remove_item_rerenders() {
        let mut client = client_with_two_lines();
        let view = client.remove_item(ProductId::new(1)).unwrap();

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.total, "50.00");
        assert_eq!(view.item_count, 1);
    }

    #[test]
    fn test_clear_renders_empty_state() {
        let mut client = client_with_two_lines();
        let view = client.clear().unwrap();

        assert!(view.is_empty());
        assert_eq!(view.total, "0.00");
        assert!(view.to_string().starts_with("Your cart is empty."));
    }

    #[test]
    fn test_cart_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut client = CartClient::load(LocalStorage::open(&path).unwrap()).unwrap();
        client.add_item(product(1, 100)).unwrap();
        client.add_item(product(2, 50)).unwrap();
        drop(client);

        let reloaded = CartClient::load(LocalStorage::open(&path).unwrap()).unwrap();
        assert_eq!(reloaded.item_count(), 2);
        assert_eq!(reloaded.render().total, "150.00");
    }

    #[tokio::test]
    async fn test_checkout_success_clears_cart() {
        let mut client = client_with_two_lines();
        let intake = FakeIntake::succeeding(7, 42);

        let receipt = client.checkout(&form(), &intake).await.unwrap();

        assert_eq!(receipt.customer_id, CustomerId::new(7));
        assert_eq!(receipt.order_id, OrderId::new(42));
        assert_eq!(receipt.total, Decimal::from(250));
        assert_eq!(receipt.next_view, View::Home);
        assert_eq!(intake.calls(), vec!["customer", "order:7"]);
        assert_eq!(intake.submitted.lock().unwrap().len(), 2);
        assert!(client.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_sends_nothing() {
        let mut client = CartClient::load(LocalStorage::ephemeral()).unwrap();
        let intake = FakeIntake::succeeding(7, 42);

        let err = client.checkout(&form(), &intake).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
        assert!(intake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_blank_fields_send_nothing() {
        let mut client = client_with_two_lines();
        let intake = FakeIntake::succeeding(7, 42);
        let blank = CustomerForm {
            first_name: Some("   ".to_owned()),
            address: None,
            ..form()
        };

        let err = client.checkout(&blank, &intake).await.unwrap_err();
        assert!(
            matches!(err, CheckoutError::MissingFields(ref f) if f == &["FirstName", "Address"])
        );
        assert!(intake.calls().is_empty());
        assert_eq!(client.item_count(), 3);
    }

    #[tokio::test]
    async fn test_checkout_customer_failure_skips_order() {
        let mut client = client_with_two_lines();
        let intake = FakeIntake::default();

        let err = client.checkout(&form(), &intake).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Remote {
                stage: CheckoutStage::CustomerSubmitted,
                customer_id: None,
                ..
            }
        ));
        assert_eq!(err.stage(), CheckoutStage::Failed);
        assert_eq!(intake.calls(), vec!["customer"]);
        assert_eq!(client.item_count(), 3);
    }

    #[tokio::test]
    async fn test_checkout_order_failure_keeps_cart() {
        let mut client = client_with_two_lines();
        let intake = FakeIntake {
            customer_result: Some(8),
            ..FakeIntake::default()
        };

        let err = client.checkout(&form(), &intake).await.unwrap_err();

        assert!(err.is_storage_error());
        assert_eq!(err.stage(), CheckoutStage::Failed);
        assert!(matches!(
            err,
            CheckoutError::Remote {
                stage: CheckoutStage::OrderSubmitted,
                customer_id: Some(id),
                ..
            } if id == CustomerId::new(8)
        ));
        assert_eq!(client.cart().items().len(), 2);
        assert_eq!(client.item_count(), 3);
    }
}
