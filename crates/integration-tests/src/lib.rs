//! Integration tests for the Aictronics demo store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p aictronics-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end cart flows against the built-in catalog
//! - `cart_properties` - Invariants checked over seeded random operation sequences
//! - `cart_persistence` - Restart and recovery behaviour of the durable store

use std::sync::Arc;

use aictronics_storefront::cart::CartManager;
use aictronics_storefront::catalog::Catalog;
use aictronics_storefront::store::{CartStore, MemoryStore};

/// Product ids of the built-in catalog.
pub const BUILTIN_IDS: [&str; 4] = ["iphone-17-pro", "iphone-air", "macbook-pro-m5", "airpods-pro-3"];

/// Open a cart over the built-in catalog.
#[must_use]
pub fn open_cart(store: impl CartStore + 'static) -> CartManager {
    CartManager::open(Arc::new(Catalog::builtin()), Box::new(store))
}

/// Open a cart over a fresh in-memory store, returning a handle to the store.
#[must_use]
pub fn fresh_cart() -> (CartManager, MemoryStore) {
    let store = MemoryStore::new();
    (open_cart(store.clone()), store)
}
