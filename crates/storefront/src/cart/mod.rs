//! Shopping cart state.
//!
//! [`CartManager`] owns the cart for the whole session. Everything else
//! sees cart contents through owned [`CartSnapshot`]s or read-only slices.
//!
//! # Persistence
//!
//! The cart is eventually durable with last-write-wins semantics: each change
//! replaces the stored snapshot wholesale, and a failed write is logged and
//! retried implicitly by the next change. The in-memory cart is always the
//! source of truth for the running session.

mod manager;
pub mod persisted;

pub use manager::{CartManager, SubscriptionId};

use aictronics_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// One product's entry in the cart.
///
/// `name` and `price` are copied from the catalog when the line is first
/// created and are never re-read, so later catalog changes do not reprice
/// existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a product into a new line.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Owned, read-only projection of the cart handed to subscribers and views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total_items: u64,
    pub subtotal: Price,
}

impl CartSnapshot {
    /// Build a snapshot, deriving the aggregates from `lines`.
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Self {
        Self {
            lines: lines.to_vec(),
            total_items: total_items(lines),
            subtotal: subtotal(lines),
        }
    }

    /// Whether the cart had no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Sum of all line quantities.
#[must_use]
pub fn total_items(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

/// Sum of `price × quantity` over all lines.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Price {
    lines.iter().map(CartLine::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: u32, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: id.to_string(),
            price: Price::from_whole(price),
            quantity,
        }
    }

    #[test]
    fn test_aggregates_of_empty_cart() {
        assert_eq!(total_items(&[]), 0);
        assert_eq!(subtotal(&[]), Price::ZERO);
    }

    #[test]
    fn test_aggregates() {
        let lines = [line("a", 1199, 3), line("b", 299, 2)];
        assert_eq!(total_items(&lines), 5);
        assert_eq!(subtotal(&lines), Price::from_whole(4195));
    }

    #[test]
    fn test_total_items_does_not_overflow_u32() {
        let lines = [line("a", 1, u32::MAX), line("b", 1, u32::MAX)];
        assert_eq!(total_items(&lines), u64::from(u32::MAX) * 2);
    }

    #[test]
    fn test_snapshot_derives_aggregates() {
        let snapshot = CartSnapshot::from_lines(&[line("a", 999, 2)]);
        assert_eq!(snapshot.total_items, 2);
        assert_eq!(snapshot.subtotal, Price::from_whole(1998));
        assert!(!snapshot.is_empty());
        assert!(CartSnapshot::default().is_empty());
    }
}
