//! Bite Core - Shared types library.
//!
//! This crate provides common types used across all Bite storefront components:
//! - `storefront` - Order intake service (customers and orders over HTTP+JSON)
//! - `client` - Cart client that persists the cart locally and drives checkout
//! - `cli` - Command-line tools for migrations, the cart, and checkout
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! on both sides of the intake API.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and money helpers
//! - [`customer`] - Checkout form and required-field validation
//! - [`order`] - Order request validation and total computation
//! - [`cart`] - Client-side cart state and rendering
//! - [`api`] - JSON response envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod customer;
pub mod order;
pub mod types;

pub use api::{ApiResponse, CustomerCreated, OrderPlaced};
pub use cart::{Cart, CartItem, CartLineView, CartView, Product};
pub use customer::{CustomerForm, CustomerValidationError, NewCustomer};
pub use order::{NewOrder, OrderLine, OrderRequest, OrderValidationError, order_total};
pub use types::*;
