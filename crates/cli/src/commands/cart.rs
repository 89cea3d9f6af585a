//! Cart commands.
//!
//! Every mutating command prints the resulting cart. Requests the cart
//! ignores (unknown product, quantity below 1) simply show the cart as it
//! was.

use std::io::Write;

use aictronics_storefront::state::AppState;

use super::CommandResult;

/// Print the cart page.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show(state: &AppState, out: &mut impl Write) -> CommandResult {
    let cart = state.cart();
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    for line in cart.lines() {
        writeln!(
            out,
            "{:<16} {:<24} {:>12} × {:<4} {:>14}",
            line.product_id,
            line.name,
            line.price.display(),
            line.quantity,
            line.line_total().display()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Items:    {}", cart.total_items())?;
    writeln!(out, "Subtotal: {}", cart.subtotal().display())?;
    Ok(())
}

/// Add a product and print the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn add(state: &mut AppState, id: &str, quantity: i64, out: &mut impl Write) -> CommandResult {
    state.cart_mut().add_item(id, quantity);
    show(state, out)
}

/// Set a line's quantity and print the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn update(
    state: &mut AppState,
    id: &str,
    quantity: i64,
    out: &mut impl Write,
) -> CommandResult {
    state.cart_mut().update_quantity(id, quantity);
    show(state, out)
}

/// Remove a line and print the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn remove(state: &mut AppState, id: &str, out: &mut impl Write) -> CommandResult {
    state.cart_mut().remove_from_cart(id);
    show(state, out)
}

/// Empty the cart and print it.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn clear(state: &mut AppState, out: &mut impl Write) -> CommandResult {
    state.cart_mut().clear_cart();
    show(state, out)
}
