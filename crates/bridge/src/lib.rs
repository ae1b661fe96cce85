//! PayPal to Shopify checkout bridge.
//!
//! A small JSON API that lets a storefront take payment through PayPal and
//! then records the paid order in Shopify:
//!
//! 1. `client-token` / `create-order` - prepare the PayPal checkout
//! 2. `capture` - settle the payment and normalize the buyer's address
//! 3. `order-from-paypal` - create and complete a Shopify draft order
//!
//! # Security
//!
//! This crate holds two sets of credentials:
//! - PayPal REST app client secret
//! - Shopify Admin API access token (HIGH PRIVILEGE)
//!
//! Browser access is limited to the configured origin allow-list.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod orders;
pub mod paypal;
pub mod routes;
pub mod shopify;
pub mod state;

use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, middleware::from_fn, middleware::from_fn_with_state};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

pub use config::BridgeConfig;
pub use error::AppError;
pub use state::AppState;

/// Largest request body accepted (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the application router with all middleware applied.
///
/// Layer order (outermost first): Sentry, CORS, tracing, request ID,
/// security headers, origin guard, body limit. Request ID runs inside the
/// trace span so it can record `request_id` on it.
pub fn app(state: AppState) -> Router {
    let cors = middleware::cors_layer(state.config());

    routes::routes()
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::origin_guard_middleware,
        ))
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(cors)
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::json;

    use super::*;
    use crate::routes::test_support::send;
    use crate::state::test_support::{ALLOWED_ORIGIN, test_state};

    fn test_app() -> Router {
        app(test_state("http://127.0.0.1:9/", "http://127.0.0.1:9/"))
    }

    #[tokio::test]
    async fn test_healthz() {
        let request = Request::get("/healthz").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_responses_carry_request_id_and_security_headers() {
        let request = Request::get("/healthz").body(Body::empty()).unwrap();
        let response = tower::ServiceExt::oneshot(test_app(), request)
            .await
            .unwrap();

        assert!(response.headers().contains_key(middleware::REQUEST_ID_HEADER));
        assert_eq!(
            response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn test_preflight_from_allowed_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/paypal/create-order")
            .header(header::ORIGIN, ALLOWED_ORIGIN)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = tower::ServiceExt::oneshot(test_app(), request)
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            ALLOWED_ORIGIN
        );
    }

    #[tokio::test]
    async fn test_request_without_origin_is_accepted() {
        let request = Request::get("/healthz").body(Body::empty()).unwrap();
        let (status, _) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let request = Request::get("/api/nope").body(Body::empty()).unwrap();
        let response = tower::ServiceExt::oneshot(test_app(), request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
