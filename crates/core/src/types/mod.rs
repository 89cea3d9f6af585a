//! Core types for the Aictronics store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod theme;

pub use id::*;
pub use price::{Price, PriceError};
pub use theme::Theme;
