//! Core types for the PayPal to Shopify bridge.
//!
//! This module provides type-safe wrappers for the domain concepts that cross
//! the PayPal and Shopify boundaries.

pub mod address;
pub mod id;
pub mod price;
pub mod status;

pub use address::NormalizedAddress;
pub use id::{GlobalId, GlobalIdError};
pub use price::{Amount, AmountError, CurrencyCode, CurrencyCodeError};
pub use status::CaptureStatus;
