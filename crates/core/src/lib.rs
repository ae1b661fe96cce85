//! PayPal to Shopify bridge core: shared types library.
//!
//! This crate provides the types shared by the bridge service and its tests:
//! - `bridge` - HTTP service relaying PayPal payments into Shopify orders
//! - `integration-tests` - End-to-end scenarios against mocked upstreams
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and lets the pure request-shaping logic be tested anywhere.
//!
//! # Modules
//!
//! - [`types`] - Addresses, Shopify global IDs, money amounts, and capture statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
