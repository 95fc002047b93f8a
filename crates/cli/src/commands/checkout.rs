//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! bite checkout --first-name Asha --mobile 9990001111 --address "12 MG Road"
//! ```

use bite_client::{CartClient, CheckoutError, HttpIntake};
use bite_core::CustomerForm;

/// Submit the cart and print the order ID.
///
/// # Errors
///
/// Returns `CheckoutError` if the cart is empty, a required field is blank,
/// or either remote call fails. The cart is kept in every error case.
pub async fn run(
    client: &mut CartClient,
    intake: &HttpIntake,
    form: CustomerForm,
) -> Result<(), CheckoutError> {
    let receipt = client.checkout(&form, intake).await.inspect_err(|e| {
        tracing::warn!(stage = %e.stage(), "checkout stopped");
    })?;

    #[allow(clippy::print_stdout)]
    {
        println!(
            "Order {} placed for customer {} (total {}). Cart cleared.",
            receipt.order_id,
            receipt.customer_id,
            bite_core::format_amount(receipt.total)
        );
        println!("Next: {}", receipt.next_view);
    }
    Ok(())
}
