//! Catalog browsing commands.

use std::io::Write;

use aictronics_storefront::error::AppError;
use aictronics_storefront::state::AppState;

use super::CommandResult;

/// Print every product with its price, in catalog order.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn list(state: &AppState, out: &mut impl Write) -> CommandResult {
    for product in state.catalog().products() {
        writeln!(
            out,
            "{:<16} {:<24} {:>12}  {}",
            product.id,
            product.name,
            product.price.display(),
            product.tagline
        )?;
    }
    Ok(())
}

/// Print one product page.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] for an unknown id, or an error if output
/// cannot be written.
pub fn show(state: &AppState, id: &str, out: &mut impl Write) -> CommandResult {
    let product = state
        .catalog()
        .find_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    if let Some(eyebrow) = &product.eyebrow {
        writeln!(out, "{eyebrow}")?;
    }
    writeln!(out, "{}", product.name)?;
    writeln!(out, "{}", product.tagline)?;
    writeln!(out)?;
    writeln!(out, "{}", product.description_long)?;
    writeln!(out)?;
    writeln!(out, "{}", product.price.display())?;
    if let Some(line) = state.cart().line(id) {
        writeln!(out, "In your cart: {}", line.quantity)?;
    }
    Ok(())
}
