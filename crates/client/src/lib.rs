//! Bite cart client.
//!
//! Holds the shopping cart in durable local storage, renders it, and drives
//! the two-call checkout against the order intake service.
//!
//! # Example
//!
//! ```rust,ignore
//! use bite_client::{CartClient, HttpIntake, LocalStorage};
//!
//! let storage = LocalStorage::open(".bite/state.json")?;
//! let mut cart = CartClient::load(storage)?;
//! cart.add_item(product)?;
//!
//! let intake = HttpIntake::new("http://localhost:5000".parse()?);
//! let receipt = cart.checkout(&form, &intake).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod gate;
pub mod intake;
pub mod storage;

pub use cart::{CART_KEY, CartClient};
pub use checkout::{CheckoutError, CheckoutReceipt, CheckoutStage, View};
pub use gate::{CREDENTIALS_KEY, GateError, LoginGate};
pub use intake::{HttpIntake, IntakeError, OrderIntake};
pub use storage::{LocalStorage, StorageError};
