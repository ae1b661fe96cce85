//! End-to-end tests for the PayPal to Shopify bridge.
//!
//! Each test boots the real router on an ephemeral port, with PayPal and
//! Shopify replaced by `wiremock` servers, and talks to it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p paypal-shopify-bridge-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::time::Duration;

use paypal_shopify_bridge::config::{
    BridgeConfig, PayPalConfig, PayPalEnvironment, ShopifyAdminConfig,
};
use paypal_shopify_bridge::{AppState, app};
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Origin the test bridge accepts.
pub const ALLOWED_ORIGIN: &str = "https://shop.example.com";

/// Admin GraphQL path for the configured API version.
pub const GRAPHQL_PATH: &str = "/admin/api/2025-01/graphql.json";

/// A running bridge plus the mock upstreams it talks to.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub paypal: MockServer,
    pub shopify: MockServer,
}

impl TestContext {
    /// Start mock upstreams and serve the bridge on an ephemeral port.
    pub async fn new() -> Self {
        let paypal = MockServer::start().await;
        let shopify = MockServer::start().await;

        let state = AppState::new(config_for(&paypal, &shopify)).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.unwrap();
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            paypal,
            shopify,
        }
    }

    /// Absolute URL for a bridge path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST JSON from the allowed storefront origin.
    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        let response = self
            .client
            .post(self.url(path))
            .header("origin", ALLOWED_ORIGIN)
            .json(body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    /// Mount a successful PayPal token exchange.
    pub async fn mount_paypal_token(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "A21AAintegration",
                "token_type": "Bearer",
                "expires_in": 32400
            })))
            .mount(&self.paypal)
            .await;
    }
}

fn config_for(paypal: &MockServer, shopify: &MockServer) -> BridgeConfig {
    BridgeConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
        upstream_timeout: Duration::from_secs(5),
        paypal: PayPalConfig {
            client_id: "integration-client".to_string(),
            client_secret: SecretString::from("integration-secret"),
            environment: PayPalEnvironment::Sandbox,
            api_base: Url::parse(&paypal.uri()).unwrap(),
        },
        shopify: ShopifyAdminConfig {
            store: "integration.myshopify.com".to_string(),
            api_version: "2025-01".to_string(),
            access_token: SecretString::from("shpat_integration"),
            base_url: Url::parse(&shopify.uri()).unwrap(),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}
