//! Aictronics Storefront library.
//!
//! This crate owns the storefront's state: the static product catalog, the
//! cart state manager with its durable local snapshot, and the demo guest
//! checkout. Rendering lives elsewhere and talks to [`cart::CartManager`]
//! through its public operations and subscriptions.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
