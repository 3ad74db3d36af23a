//! Core types for Padma Bazar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod phone;
pub mod price;
pub mod status;

pub use id::*;
pub use phone::BdPhone;
pub use price::{CurrencyCode, Price, PriceError};
pub use status::*;
