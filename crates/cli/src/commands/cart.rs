//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! bite cart add --id 1 --name "Veg Puff" --price 25
//! bite cart remove 1
//! bite cart show
//! bite cart clear
//! ```

use bite_client::{CartClient, StorageError};
use bite_core::{Product, ProductId};
use rust_decimal::Decimal;

/// Add one unit of a product and print the cart badge count.
///
/// # Errors
///
/// Returns `StorageError` if the cart cannot be saved.
pub fn add(
    client: &mut CartClient,
    id: ProductId,
    name: String,
    price: Decimal,
) -> Result<(), StorageError> {
    let count = client.add_item(Product { id, name, price })?;

    #[allow(clippy::print_stdout)]
    {
        println!("Added. Items in cart: {count}");
    }
    Ok(())
}

/// Remove a product and print the updated cart.
///
/// # Errors
///
/// Returns `StorageError` if the cart cannot be saved.
pub fn remove(client: &mut CartClient, id: ProductId) -> Result<(), StorageError> {
    let view = client.remove_item(id)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{view}");
        println!("Items in cart: {}", view.item_count);
    }
    Ok(())
}

/// Empty the cart and print the empty state.
///
/// # Errors
///
/// Returns `StorageError` if the cart cannot be saved.
pub fn clear(client: &mut CartClient) -> Result<(), StorageError> {
    let view = client.clear()?;

    #[allow(clippy::print_stdout)]
    {
        println!("{view}");
        println!("Items in cart: {}", view.item_count);
    }
    Ok(())
}

/// Print the cart.
pub fn show(client: &CartClient) {
    let view = client.render();

    #[allow(clippy::print_stdout)]
    {
        println!("{view}");
        println!("Items in cart: {}", view.item_count);
    }
}
