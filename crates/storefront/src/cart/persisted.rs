//! Persisted cart layout.
//!
//! Current format:
//!
//! ```json
//! {"version":1,"items":[{"productId":"iphone-17-pro","name":"Aictronics Phone Pro","price":1199.0,"quantity":3}]}
//! ```
//!
//! The bare item array written by the browser build of the store is still
//! accepted on load. Anything else, including an unknown version or a
//! duplicated product, is rejected as corrupt.

use std::collections::HashSet;

use aictronics_core::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CartLine;

/// Version written by [`encode`].
pub const CURRENT_VERSION: u32 = 1;

/// Reasons a persisted blob cannot be turned back into a cart.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed cart blob: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported cart blob version {0}")]
    UnsupportedVersion(u32),
    #[error("cart blob lists product {0} more than once")]
    DuplicateLine(ProductId),
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    items: &'a [CartLine],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCart {
    Versioned { version: u32, items: Vec<CartLine> },
    Legacy(Vec<CartLine>),
}

/// Serialize the full line sequence.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] if serialization fails.
pub fn encode(lines: &[CartLine]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&Envelope {
        version: CURRENT_VERSION,
        items: lines,
    })?)
}

/// Parse a stored blob back into cart lines, preserving order.
///
/// Lines with a zero quantity are dropped.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if the blob is malformed, has an unknown
/// version, or lists a product twice.
pub fn decode(blob: &str) -> Result<Vec<CartLine>, SnapshotError> {
    let items = match serde_json::from_str(blob)? {
        StoredCart::Versioned { version, items } if version == CURRENT_VERSION => items,
        StoredCart::Versioned { version, .. } => {
            return Err(SnapshotError::UnsupportedVersion(version));
        }
        StoredCart::Legacy(items) => items,
    };

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.product_id.as_str()) {
            return Err(SnapshotError::DuplicateLine(item.product_id.clone()));
        }
    }

    Ok(items.into_iter().filter(|item| item.quantity > 0).collect())
}
