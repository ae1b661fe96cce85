//! HTTP route handlers for the bridge.
//!
//! # Route Structure
//!
//! ```text
//! GET  /healthz                          - Liveness check
//!
//! # PayPal
//! POST /api/paypal/client-token          - Client token for hosted card fields
//! POST /api/paypal/create-order          - Create a CAPTURE order
//! POST /api/paypal/capture               - Capture and normalize the buyer address
//!
//! # Shopify
//! POST /api/shopify/order-from-paypal    - Draft order create + complete
//! ```

pub mod health;
pub mod paypal;
pub mod shopify;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the PayPal API routes router.
pub fn paypal_routes() -> Router<AppState> {
    Router::new()
        .route("/client-token", post(paypal::client_token))
        .route("/create-order", post(paypal::create_order))
        .route("/capture", post(paypal::capture))
}

/// Create the Shopify API routes router.
pub fn shopify_routes() -> Router<AppState> {
    Router::new().route("/order-from-paypal", post(shopify::order_from_paypal))
}

/// Create the full application router (without middleware layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .nest("/api/paypal", paypal_routes())
        .nest("/api/shopify", shopify_routes())
}
