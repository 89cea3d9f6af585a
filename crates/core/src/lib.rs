//! Aictronics Core - Shared types library.
//!
//! This crate provides common types used across the Aictronics demo store:
//! - `storefront` - Catalog, cart state manager, and mock checkout
//! - `cli` - Command-line driver that renders the storefront state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no logging.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and display themes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
