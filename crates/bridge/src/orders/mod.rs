//! Turning a captured PayPal payment into a finalized Shopify order.
//!
//! # Flow
//!
//! 1. [`request::FinalizeOrderRequest::validate`] - pure, no network
//! 2. [`build::draft_order_input`] - reshape into `DraftOrderInput`
//! 3. [`finalize::finalize_order`] - `draftOrderCreate`, then
//!    `draftOrderComplete`

pub mod build;
pub mod finalize;
pub mod request;

pub use finalize::{FinalizeError, FinalizedOrder, finalize_order};
pub use request::FinalizeOrderRequest;
