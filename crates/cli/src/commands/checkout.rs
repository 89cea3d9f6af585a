//! Demo guest checkout command.

use std::io::Write;

use aictronics_storefront::checkout::guest_checkout;
use aictronics_storefront::state::AppState;

use super::CommandResult;

/// Check out as a guest and print the confirmation.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn guest(state: &mut AppState, out: &mut impl Write) -> CommandResult {
    let Some(confirmation) = guest_checkout(state.cart_mut()) else {
        writeln!(out, "Your cart is empty. Nothing to check out.")?;
        return Ok(());
    };

    writeln!(out, "Thank you for your purchase! (Demo checkout)")?;
    writeln!(out, "Order {}", confirmation.order_number)?;
    writeln!(out)?;

    let summary = confirmation.summary();
    for line in &summary.lines {
        writeln!(out, "{:<36} {:>14}", line.label, line.line_total.display())?;
    }
    writeln!(out, "{:<36} {:>14}", "Total", summary.total.display())?;

    if !confirmation.cart_cleared_in_store {
        writeln!(out)?;
        writeln!(
            out,
            "Note: the saved cart could not be updated and may still list these items."
        )?;
    }
    Ok(())
}
