//! Client-credentials exchange against PayPal's OAuth endpoint.

use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::instrument;

use super::{PayPalClient, PayPalError};
use crate::http::fetch_json;

impl PayPalClient {
    /// Obtain a fresh bearer token.
    ///
    /// Tokens are never cached: each caller acquires its own.
    ///
    /// # Errors
    ///
    /// Returns `PayPalError::Auth` if PayPal rejects the credentials or the
    /// response carries no `access_token`, and `PayPalError::Network` if
    /// PayPal cannot be reached.
    #[instrument(skip(self))]
    pub async fn acquire_token(&self) -> Result<SecretString, PayPalError> {
        let request = self
            .inner
            .client
            .post(self.url("/v1/oauth2/token"))
            .basic_auth(
                &self.inner.client_id,
                Some(self.inner.client_secret.expose_secret()),
            )
            .header(ACCEPT, "application/json")
            .form(&[("grant_type", "client_credentials")]);

        let body = fetch_json(request).await.map_err(|err| {
            tracing::warn!(status = ?err.status(), "PayPal token exchange failed");
            PayPalError::auth(err)
        })?;

        match body.get("access_token").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => Ok(SecretString::from(token.to_string())),
            _ => {
                tracing::warn!("PayPal token response had no access_token");
                Err(PayPalError::Auth {
                    status: None,
                    details: body,
                })
            }
        }
    }
}
