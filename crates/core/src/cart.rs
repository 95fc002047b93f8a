//! Client-side cart state and rendering.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s with at most one entry per
//! product. It is owned by whoever drives checkout and serialized as a plain
//! JSON list for durable storage.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, format_amount};

/// Message rendered in place of line items when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Currency label used when rendering prices.
pub const CURRENCY_LABEL: &str = "Rs";

/// A product as offered to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
}

/// One cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `product` and return the entry's new quantity.
    ///
    /// If the product is already in the cart its quantity is incremented and
    /// the stored name and price are kept; otherwise a new entry with
    /// quantity 1 is appended.
    pub fn add(&mut self, product: Product) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items.push(CartItem {
            id: product.id,
            name: product.name,
            price: product.price,
            quantity: 1,
        });
        1
    }

    /// Remove every entry for `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |sum, item| sum.saturating_add(item.quantity))
    }

    /// Sum of every entry's subtotal.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.subtotal()))
    }

    /// Compute the display view of the cart.
    #[must_use]
    pub fn render(&self) -> CartView {
        CartView {
            lines: self.items.iter().map(CartLineView::from).collect(),
            total: format_amount(self.total()),
            item_count: self.item_count(),
        }
    }
}

/// Display data for one cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: format_amount(item.price),
            quantity: item.quantity,
            subtotal: format_amount(item.subtotal()),
        }
    }
}

/// Display data for the whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    /// Cart total with two decimal places; `0.00` when empty.
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            writeln!(f, "{EMPTY_CART_MESSAGE}")?;
        }
        for line in &self.lines {
            writeln!(
                f,
                "[{}] {}: {} {CURRENCY_LABEL} x {} = {}",
                line.id, line.name, line.price, line.quantity, line.subtotal
            )?;
        }
        write!(f, "Total: {} {CURRENCY_LABEL}", self.total)
    }
}
