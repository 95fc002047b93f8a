//! Intake service against `PostgreSQL`.
//!
//! These tests require a reachable database in `STOREFRONT_DATABASE_URL`.
//! Migrations are applied on connect. Each test creates fresh rows and
//! checks only those, so they can share a database.
//!
//! Run with: `cargo test -p bite-integration-tests -- --include-ignored`

use std::sync::Arc;

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;

use bite_client::{CartClient, HttpIntake, LocalStorage};
use bite_core::{CustomerForm, NewOrder, OrderLine, Product, ProductId};
use bite_integration_tests::TestServer;
use bite_storefront::db::{
    self, CustomerRepository, IntakeStore, OrderRepository, PgIntakeStore, RepositoryError,
};

async fn pool() -> PgPool {
    let url = std::env::var("STOREFRONT_DATABASE_URL")
        .expect("STOREFRONT_DATABASE_URL must be set for PostgreSQL tests");
    let pool = db::create_pool(&SecretString::from(url), 2)
        .await
        .expect("Failed to connect");
    sqlx::migrate!("../storefront/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

fn form() -> CustomerForm {
    CustomerForm {
        first_name: Some("A".to_owned()),
        mobile_number: Some("999".to_owned()),
        address: Some("X".to_owned()),
        ..CustomerForm::default()
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOREFRONT_DATABASE_URL)"]
async fn test_checkout_writes_header_and_items() {
    let pool = pool().await;
    let server = TestServer::start(Arc::new(PgIntakeStore::new(pool.clone()))).await;
    let intake = HttpIntake::new(server.url());

    let mut client = CartClient::load(LocalStorage::ephemeral()).expect("load");
    for (id, price) in [(1, 100), (1, 100), (2, 50)] {
        client
            .add_item(Product {
                id: ProductId::new(id),
                name: format!("Product {id}"),
                price: Decimal::from(price),
            })
            .expect("add");
    }

    let receipt = client.checkout(&form(), &intake).await.expect("checkout");

    let customer = CustomerRepository::new(&pool)
        .get_by_id(receipt.customer_id)
        .await
        .expect("query")
        .expect("customer row");
    assert_eq!(customer.first_name, "A");
    assert_eq!(customer.address, "X");

    let (order, items) = OrderRepository::new(&pool)
        .get_with_items(receipt.order_id)
        .await
        .expect("query")
        .expect("order row");
    assert_eq!(order.customer_id, receipt.customer_id);
    assert_eq!(order.total_amount, Decimal::from(250));
    assert_eq!(items.len(), 2);
    assert!(client.cart().is_empty());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOREFRONT_DATABASE_URL)"]
async fn test_identical_customers_get_distinct_ids() {
    let pool = pool().await;
    let store = PgIntakeStore::new(pool);
    let customer = form().validate().expect("valid");

    let first = store.insert_customer(&customer).await.expect("insert");
    let second = store.insert_customer(&customer).await.expect("insert");

    assert!(first.is_positive());
    assert_ne!(first, second);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOREFRONT_DATABASE_URL)"]
async fn test_unknown_customer_is_rejected_without_rows() {
    let pool = pool().await;
    let store = PgIntakeStore::new(pool.clone());
    let customer_id = store
        .insert_customer(&form().validate().expect("valid"))
        .await
        .expect("insert");

    // Well past any ID the sequence has handed out
    let dangling = bite_core::CustomerId::new(i32::MAX);
    let order = NewOrder {
        customer_id: dangling,
        lines: vec![OrderLine {
            id: ProductId::new(1),
            price: Decimal::from(10),
            quantity: 1,
        }],
        total: Decimal::from(10),
    };

    let err = store.insert_order(&order).await.expect_err("FK violation");
    assert!(matches!(err, RepositoryError::Database(_)));
    assert!(err.to_string().contains("foreign key"));

    let orders = OrderRepository::new(&pool)
        .ids_for_customer(dangling)
        .await
        .expect("query");
    assert!(orders.is_empty());

    // The customer created first is untouched and has no orders
    let orders = OrderRepository::new(&pool)
        .ids_for_customer(customer_id)
        .await
        .expect("query");
    assert!(orders.is_empty());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOREFRONT_DATABASE_URL)"]
async fn test_failed_items_insert_rolls_back_header() {
    let pool = pool().await;
    let store = PgIntakeStore::new(pool.clone());
    let customer_id = store
        .insert_customer(&form().validate().expect("valid"))
        .await
        .expect("insert");

    // Four binds per line: 16,384 lines exceed the 65,535 bind parameters a
    // single statement may carry, so the header insert succeeds and the
    // items insert fails inside the same transaction.
    let lines: Vec<OrderLine> = (1..=16_384)
        .map(|id| OrderLine {
            id: ProductId::new(id),
            price: Decimal::ONE,
            quantity: 1,
        })
        .collect();
    let order = NewOrder {
        customer_id,
        total: Decimal::from(16_384),
        lines,
    };

    let err = store.insert_order(&order).await.expect_err("items insert fails");
    assert!(matches!(err, RepositoryError::Database(_)));

    let orders = OrderRepository::new(&pool)
        .ids_for_customer(customer_id)
        .await
        .expect("query");
    assert!(orders.is_empty());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOREFRONT_DATABASE_URL)"]
async fn test_ready_when_database_reachable() {
    let store = PgIntakeStore::new(pool().await);
    assert!(store.ping().await.is_ok());
}
