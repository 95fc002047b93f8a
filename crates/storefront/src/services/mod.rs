//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `intake` - Customer creation and order placement

pub mod intake;

pub use intake::{IntakeError, IntakeService};
