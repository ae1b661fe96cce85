//! PayPal operations used by the storefront checkout.
//!
//! Each operation acquires its own bearer token, performs a single call and
//! maps the upstream failure into the matching [`PayPalError`] variant.

use paypal_shopify_bridge_core::{Amount, CurrencyCode};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::{PayPalClient, PayPalError, capture};
use crate::http::{UpstreamError, fetch_json};

/// Order creation body (`intent: CAPTURE`, one purchase unit).
#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    intent: &'static str,
    purchase_units: [PurchaseUnit<'a>; 1],
}

#[derive(Debug, Serialize)]
struct PurchaseUnit<'a> {
    amount: Money<'a>,
}

#[derive(Debug, Serialize)]
struct Money<'a> {
    currency_code: &'a str,
    value: &'a str,
}

impl PayPalClient {
    /// Generate a client token for the PayPal JS SDK (hosted card fields).
    ///
    /// # Errors
    ///
    /// Returns `PayPalError::ClientToken` if PayPal responds with an error or
    /// omits `client_token`, plus any error from [`Self::acquire_token`].
    #[instrument(skip(self))]
    pub async fn generate_client_token(&self) -> Result<String, PayPalError> {
        let token = self.acquire_token().await?;

        let request = self
            .inner
            .client
            .post(self.url("/v1/identity/generateToken"))
            .bearer_auth(token.expose_secret())
            .header(ACCEPT, "application/json")
            .header(ACCEPT_LANGUAGE, "en_US")
            .header(CONTENT_TYPE, "application/json");

        let body = fetch_json(request).await.map_err(|err| match err {
            UpstreamError::Network(e) => PayPalError::Network(e),
            other => {
                tracing::warn!(status = ?other.status(), "PayPal client token request rejected");
                PayPalError::ClientToken {
                    details: other.body(),
                }
            }
        })?;

        match body.get("client_token").and_then(Value::as_str) {
            Some(client_token) if !client_token.is_empty() => Ok(client_token.to_string()),
            _ => Err(PayPalError::ClientToken { details: body }),
        }
    }

    /// Create a CAPTURE-intent order with a single purchase unit.
    ///
    /// # Errors
    ///
    /// Returns `PayPalError::OrderCreation` carrying the upstream status when
    /// PayPal rejects the order, plus any error from [`Self::acquire_token`].
    #[instrument(skip(self, amount, currency), fields(amount = %amount, currency = %currency))]
    pub async fn create_order(
        &self,
        amount: &Amount,
        currency: &CurrencyCode,
    ) -> Result<String, PayPalError> {
        let token = self.acquire_token().await?;

        let body = CreateOrderBody {
            intent: "CAPTURE",
            purchase_units: [PurchaseUnit {
                amount: Money {
                    currency_code: currency.as_str(),
                    value: amount.as_str(),
                },
            }],
        };

        let request = self
            .inner
            .client
            .post(self.url("/v2/checkout/orders"))
            .bearer_auth(token.expose_secret())
            .header(ACCEPT, "application/json")
            .json(&body);

        let response = fetch_json(request).await.map_err(|err| match err {
            UpstreamError::Network(e) => PayPalError::Network(e),
            other => {
                tracing::warn!(status = ?other.status(), "PayPal order creation rejected");
                PayPalError::OrderCreation {
                    status: other.status(),
                    details: other.body(),
                }
            }
        })?;

        match response.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => {
                tracing::info!(paypal_order_id = %id, "PayPal order created");
                Ok(id.to_string())
            }
            _ => Err(PayPalError::OrderCreation {
                status: None,
                details: response,
            }),
        }
    }

    /// Capture an approved order and return PayPal's raw response.
    ///
    /// The response is only returned when its status is `COMPLETED`.
    ///
    /// # Errors
    ///
    /// Returns `PayPalError::Capture` if the call fails upstream,
    /// `PayPalError::CaptureNotCompleted` (with the raw response) if the
    /// payment did not settle, plus any error from [`Self::acquire_token`].
    #[instrument(skip(self))]
    pub async fn capture_order(&self, order_id: &str) -> Result<Value, PayPalError> {
        let token = self.acquire_token().await?;

        let request = self
            .inner
            .client
            .post(self.url(&format!("/v2/checkout/orders/{order_id}/capture")))
            .bearer_auth(token.expose_secret())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        let raw = fetch_json(request).await.map_err(|err| match err {
            UpstreamError::Network(e) => PayPalError::Network(e),
            other => {
                tracing::warn!(status = ?other.status(), "PayPal capture rejected");
                PayPalError::Capture {
                    details: other.body(),
                }
            }
        })?;

        let status = capture::capture_status(&raw);
        if !status.is_completed() {
            tracing::warn!(capture_status = %status, "PayPal capture not completed");
            return Err(PayPalError::CaptureNotCompleted { status, raw });
        }

        Ok(raw)
    }
}
