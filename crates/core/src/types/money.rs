//! Decimal money helpers.
//!
//! Prices are plain [`Decimal`] amounts in the store's single currency. The
//! storefront never converts between currencies, so no currency code is
//! carried alongside the amount.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount with exactly two decimal places (e.g. `250.00`).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Multiply a unit price by a quantity.
///
/// Returns `None` if the result overflows the decimal range.
#[must_use]
pub fn line_total(price: Decimal, quantity: i32) -> Option<Decimal> {
    price.checked_mul(Decimal::from(quantity))
}
