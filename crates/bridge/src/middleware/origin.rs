//! Browser origin allow-list.
//!
//! CORS headers alone do not stop a non-listed site from triggering a
//! payment call (simple requests are still sent), so the guard rejects any
//! request whose `Origin` is not configured. Requests without an `Origin`
//! header (server-to-server, curl) pass through.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::BridgeConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Reject requests carrying an `Origin` that is not on the allow-list.
pub async fn origin_guard_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        let allowed = origin
            .to_str()
            .is_ok_and(|origin| state.config().is_origin_allowed(origin));

        if !allowed {
            tracing::warn!(origin = ?origin, "Rejected request from non-allowed origin");
            return AppError::OriginNotAllowed.into_response();
        }
    }

    next.run(request).await
}

/// CORS layer granting access to the configured origins only.
#[must_use]
pub fn cors_layer(config: &BridgeConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(origin = %origin, error = %e, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
