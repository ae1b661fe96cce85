//! Shared "send, check status, decode JSON" helper for upstream calls.
//!
//! Every PayPal and Shopify call goes through [`fetch_json`] so that failure
//! shapes are built in one place: the caller gets either the decoded payload
//! or an [`UpstreamError`] carrying the status and the body the upstream sent.

use reqwest::RequestBuilder;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single upstream HTTP exchange.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}")]
    Status {
        /// HTTP status code returned upstream.
        status: u16,
        /// Response body, decoded as JSON when possible, else as a string.
        body: Value,
    },

    /// The upstream answered 2xx but the body was not JSON.
    #[error("upstream returned HTTP {status} with a non-JSON body")]
    InvalidBody {
        /// HTTP status code returned upstream.
        status: u16,
        /// Raw body text.
        body: String,
    },
}

impl UpstreamError {
    /// Upstream status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Network(_) => None,
            Self::Status { status, .. } | Self::InvalidBody { status, .. } => Some(*status),
        }
    }

    /// JSON description suitable for echoing to the caller.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::Network(err) => serde_json::json!({ "message": err.to_string() }),
            Self::Status { status, body } => serde_json::json!({ "status": status, "body": body }),
            Self::InvalidBody { status, body } => {
                serde_json::json!({ "status": status, "body": body })
            }
        }
    }

    /// Body returned by the upstream, when there was one.
    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::Network(_) => Value::Null,
            Self::Status { body, .. } => body.clone(),
            Self::InvalidBody { body, .. } => Value::String(body.clone()),
        }
    }
}

/// Send a request and decode a successful JSON response.
///
/// An empty 2xx body decodes to `Value::Null`.
///
/// # Errors
///
/// Returns [`UpstreamError::Network`] when no response arrives,
/// [`UpstreamError::Status`] for non-2xx responses, and
/// [`UpstreamError::InvalidBody`] for 2xx responses that are not JSON.
pub async fn fetch_json(request: RequestBuilder) -> Result<Value, UpstreamError> {
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body: parse_body(&text),
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|_| UpstreamError::InvalidBody {
        status: status.as_u16(),
        body: text,
    })
}

/// Decode a body as JSON, falling back to a JSON string of the raw text.
fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
