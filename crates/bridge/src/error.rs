//! Unified error handling with Sentry integration.
//!
//! Every route returns `Result<T, AppError>`. The response body is always the
//! JSON envelope `{ "ok": false, "error": <code>, "details"?: <any> }`.
//! Server errors (5xx) are captured to Sentry before responding.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::orders::FinalizeError;
use crate::paypal::PayPalError;
use crate::shopify::AdminShopifyError;

/// Application-level error type for the bridge.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body could not be parsed as the expected JSON.
    #[error("Invalid JSON: {message}")]
    InvalidJson {
        status: StatusCode,
        message: String,
    },

    /// The request's `Origin` is not on the allow-list.
    #[error("Origin not allowed")]
    OriginNotAllowed,

    /// PayPal operation failed.
    #[error("PayPal error: {0}")]
    PayPal(#[from] PayPalError),

    /// Order finalization failed.
    #[error("Order error: {0}")]
    Finalize(#[from] FinalizeError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::InvalidJson {
            status,
            message: rejection.body_text(),
        }
    }
}

impl AppError {
    /// HTTP status, `error` code and optional `details` for the envelope.
    fn parts(&self) -> (StatusCode, String, Option<Value>) {
        match self {
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                "invalid_request".to_string(),
                Some(Value::String(message.clone())),
            ),
            Self::InvalidJson { status, message } => {
                let code = if *status == StatusCode::PAYLOAD_TOO_LARGE {
                    "payload_too_large"
                } else {
                    "invalid_json"
                };
                (*status, code.to_string(), Some(Value::String(message.clone())))
            }
            Self::OriginNotAllowed => (
                StatusCode::FORBIDDEN,
                "origin_not_allowed".to_string(),
                None,
            ),
            Self::PayPal(err) => paypal_parts(err),
            Self::Finalize(err) => match err {
                FinalizeError::Validation(violations) => (
                    StatusCode::BAD_REQUEST,
                    "validation_failed".to_string(),
                    Some(json!(violations)),
                ),
                FinalizeError::DraftCreate { details } => (
                    StatusCode::BAD_REQUEST,
                    "draft_order_create_failed".to_string(),
                    Some(details.clone()),
                ),
                FinalizeError::DraftComplete { details, .. } => (
                    StatusCode::BAD_REQUEST,
                    "draft_order_complete_failed".to_string(),
                    Some(details.clone()),
                ),
                FinalizeError::Shopify(err) => shopify_parts(err),
            },
        }
    }
}

fn paypal_parts(err: &PayPalError) -> (StatusCode, String, Option<Value>) {
    match err {
        PayPalError::Auth { status, details } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "paypal_auth_failed".to_string(),
            Some(json!({ "status": status, "body": details })),
        ),
        PayPalError::ClientToken { details } => (
            StatusCode::BAD_REQUEST,
            "client_token_failed".to_string(),
            Some(details.clone()),
        ),
        PayPalError::OrderCreation { status, details } => (
            status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            "create_order_failed".to_string(),
            Some(details.clone()),
        ),
        PayPalError::Capture { details } => (
            StatusCode::BAD_REQUEST,
            "capture_failed".to_string(),
            Some(details.clone()),
        ),
        PayPalError::CaptureNotCompleted { raw, .. } => (
            StatusCode::BAD_REQUEST,
            "capture_failed".to_string(),
            Some(raw.clone()),
        ),
        PayPalError::Network(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None),
    }
}

fn shopify_parts(err: &AdminShopifyError) -> (StatusCode, String, Option<Value>) {
    match err {
        AdminShopifyError::Transport { details, .. } => (
            StatusCode::BAD_REQUEST,
            "shopify_transport_failed".to_string(),
            Some(details.clone()),
        ),
        AdminShopifyError::GraphQL(errors) => (
            StatusCode::BAD_REQUEST,
            "shopify_graphql_errors".to_string(),
            Some(json!(errors)),
        ),
        AdminShopifyError::Parse(_) | AdminShopifyError::Endpoint(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, details) = self.parts();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let mut body = json!({ "ok": false, "error": code });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
