//! Domain models for the order intake store.
//!
//! These are the persisted rows behind the intake API. Rows are written once
//! and never updated by the storefront.

pub mod customer;
pub mod order;

pub use customer::Customer;
pub use order::{Order, OrderItem};
