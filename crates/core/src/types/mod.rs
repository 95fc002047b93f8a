//! Core types for the Bite storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{format_amount, line_total};
