//! PayPal REST API client.
//!
//! # Security
//!
//! The client holds the REST app's client secret. Bearer tokens obtained
//! from it live only for the duration of one operation: every operation
//! performs its own client-credentials exchange and nothing is cached.
//!
//! # Architecture
//!
//! - [`auth`] - client-credentials exchange (`/v1/oauth2/token`)
//! - [`gateway`] - client token, order creation, order capture
//! - [`capture`] - pure normalization of a capture response
//!
//! # Example
//!
//! ```rust,ignore
//! use paypal_shopify_bridge::paypal::PayPalClient;
//!
//! let paypal = PayPalClient::new(&config.paypal, http.clone());
//!
//! let order_id = paypal.create_order(&amount, &currency).await?;
//! let raw = paypal.capture_order(&order_id).await?;
//! let normalized = paypal_shopify_bridge::paypal::capture::normalize(&raw);
//! ```

pub mod auth;
pub mod capture;
pub mod gateway;

use std::sync::Arc;

use paypal_shopify_bridge_core::CaptureStatus;
use secrecy::SecretString;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::PayPalConfig;
use crate::http::UpstreamError;

/// Errors that can occur when interacting with the PayPal REST API.
#[derive(Debug, Error)]
pub enum PayPalError {
    /// The client-credentials exchange was refused or returned no token.
    #[error("PayPal authentication failed")]
    Auth {
        /// Upstream status, if a response was received.
        status: Option<u16>,
        /// Upstream body.
        details: Value,
    },

    /// Generating a front-end client token failed.
    #[error("PayPal client token request failed")]
    ClientToken {
        /// Upstream body.
        details: Value,
    },

    /// Creating a PayPal order failed.
    #[error("PayPal order creation failed")]
    OrderCreation {
        /// Upstream status, if the upstream rejected the request.
        status: Option<u16>,
        /// Upstream body.
        details: Value,
    },

    /// The capture call itself failed.
    #[error("PayPal capture failed")]
    Capture {
        /// Upstream body.
        details: Value,
    },

    /// The capture call succeeded but the payment is not settled.
    #[error("PayPal capture status is {status}, expected COMPLETED")]
    CaptureNotCompleted {
        /// Status reported by PayPal.
        status: CaptureStatus,
        /// Full capture response, disclosed for diagnostics.
        raw: Value,
    },

    /// The request never reached PayPal (DNS, connect, timeout).
    #[error("PayPal request failed: {0}")]
    Network(#[source] reqwest::Error),
}

impl PayPalError {
    fn auth(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Network(e) => Self::Network(e),
            other => Self::Auth {
                status: other.status(),
                details: other.body(),
            },
        }
    }
}

/// PayPal REST API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct PayPalClient {
    inner: Arc<PayPalClientInner>,
}

struct PayPalClientInner {
    client: reqwest::Client,
    api_base: Url,
    client_id: String,
    client_secret: SecretString,
}

impl PayPalClient {
    /// Create a new PayPal client.
    ///
    /// # Arguments
    ///
    /// * `config` - PayPal REST API configuration
    /// * `client` - Shared HTTP client (carries the upstream timeout)
    #[must_use]
    pub fn new(config: &PayPalConfig, client: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(PayPalClientInner {
                client,
                api_base: config.api_base.clone(),
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.clone(),
            }),
        }
    }

    /// Absolute URL for an API path (`path` starts with `/`).
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.api_base.as_str().trim_end_matches('/'))
    }
}
