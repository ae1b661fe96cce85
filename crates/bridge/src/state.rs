//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::paypal::PayPalClient;
use crate::shopify::{AdminClient, AdminShopifyError};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to build Shopify Admin client: {0}")]
    Shopify(#[from] AdminShopifyError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything in it is immutable after startup;
/// the only shared resource is the HTTP connection pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BridgeConfig,
    paypal: PayPalClient,
    admin: AdminClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds one `reqwest::Client` (carrying the upstream timeout) shared by
    /// the PayPal and Shopify clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the Shopify
    /// endpoint is invalid.
    pub fn new(config: BridgeConfig) -> Result<Self, StateError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        let paypal = PayPalClient::new(&config.paypal, http.clone());
        let admin = AdminClient::new(&config.shopify, http)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                paypal,
                admin,
            }),
        })
    }

    /// Get a reference to the bridge configuration.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.inner.config
    }

    /// Get a reference to the PayPal REST API client.
    #[must_use]
    pub fn paypal(&self) -> &PayPalClient {
        &self.inner.paypal
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn admin(&self) -> &AdminClient {
        &self.inner.admin
    }
}
