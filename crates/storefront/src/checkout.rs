//! Demo guest checkout.
//!
//! There is no payment step and nothing is stored: checking out turns the
//! current cart into an [`OrderConfirmation`] and empties the cart.

use aictronics_core::Price;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::cart::{CartLine, CartManager, CartSnapshot};

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummaryLine {
    /// `"{name} × {quantity}"`.
    pub label: String,
    pub line_total: Price,
}

impl From<&CartLine> for OrderSummaryLine {
    fn from(line: &CartLine) -> Self {
        Self {
            label: format!("{} × {}", line.name, line.quantity),
            line_total: line.line_total(),
        }
    }
}

/// Order summary shown before and after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub lines: Vec<OrderSummaryLine>,
    pub total: Price,
}

impl From<&CartSnapshot> for OrderSummary {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            lines: snapshot.lines.iter().map(OrderSummaryLine::from).collect(),
            total: snapshot.subtotal,
        }
    }
}

/// Result of a completed demo checkout.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub order_number: Uuid,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<CartLine>,
    pub total_items: u64,
    pub subtotal: Price,
    /// `false` when the emptied cart could not be saved. The store keeps the
    /// ordered lines until a later cart change is persisted.
    pub cart_cleared_in_store: bool,
}

impl OrderConfirmation {
    /// Summary rows for the confirmed order.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            lines: self.items.iter().map(OrderSummaryLine::from).collect(),
            total: self.subtotal,
        }
    }
}

/// Check out as a guest.
///
/// Returns `None` without touching the cart if it is empty. Otherwise the
/// cart is emptied and the confirmation records whether that was saved.
pub fn guest_checkout(cart: &mut CartManager) -> Option<OrderConfirmation> {
    if cart.is_empty() {
        tracing::debug!("Checkout requested with empty cart");
        return None;
    }

    let snapshot = cart.snapshot();
    cart.clear_cart();
    let confirmation = OrderConfirmation {
        order_number: Uuid::new_v4(),
        placed_at: Utc::now(),
        items: snapshot.lines,
        total_items: snapshot.total_items,
        subtotal: snapshot.subtotal,
        cart_cleared_in_store: cart.last_persist_error().is_none(),
    };

    if confirmation.cart_cleared_in_store {
        tracing::info!(
            order_number = %confirmation.order_number,
            total_items = confirmation.total_items,
            subtotal = %confirmation.subtotal,
            "Demo order placed"
        );
    } else {
        tracing::warn!(
            order_number = %confirmation.order_number,
            error = cart.last_persist_error().unwrap_or_default(),
            "Demo order placed but the stored cart still holds its lines"
        );
    }
    Some(confirmation)
}
