//! Shopify Admin API GraphQL client.
//!
//! Authenticates with a static Admin API access token
//! (`X-Shopify-Access-Token`); there is no OAuth dance in the bridge.

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::config::ShopifyAdminConfig;
use crate::http::fetch_json;

use super::{AdminShopifyError, GraphQLError, GraphQLErrorLocation};

mod draft_orders;
pub mod queries;

/// Shopify Admin API GraphQL client.
///
/// # Security
///
/// The access token has HIGH PRIVILEGE access to the store. It is only ever
/// sent to the configured store's Admin endpoint.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    endpoint: Url,
    access_token: SecretString,
}

/// GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    #[serde(default)]
    data: Option<Value>,
    /// Normally an array of error objects, but throttled and malformed
    /// requests get a bare string or object instead.
    #[serde(default)]
    errors: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    #[serde(default)]
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl From<GraphQLErrorResponse> for GraphQLError {
    fn from(e: GraphQLErrorResponse) -> Self {
        Self {
            message: e.message,
            locations: e
                .locations
                .into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: l.line,
                    column: l.column,
                })
                .collect(),
            path: e.path,
        }
    }
}

/// Flatten a top-level `errors` member of any shape into error entries.
///
/// Empty strings, arrays and objects (and `null`) yield no entries.
fn graphql_errors(errors: Value) -> Vec<GraphQLError> {
    match errors {
        Value::Null => vec![],
        Value::Array(items) => items.into_iter().filter_map(graphql_error).collect(),
        other => graphql_error(other).into_iter().collect(),
    }
}

fn graphql_error(value: Value) -> Option<GraphQLError> {
    let message_only = |message: String| GraphQLError {
        message,
        locations: vec![],
        path: vec![],
    };

    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(message_only(s)),
        Value::Object(ref fields) if fields.is_empty() => None,
        Value::Object(_) => match serde_json::from_value::<GraphQLErrorResponse>(value.clone()) {
            Ok(e) if !e.message.is_empty() => Some(e.into()),
            _ => Some(message_only(value.to_string())),
        },
        other => Some(message_only(other.to_string())),
    }
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// # Arguments
    ///
    /// * `config` - Shopify Admin API configuration
    /// * `client` - Shared HTTP client (carries the upstream timeout)
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::Endpoint` if the store and API version do
    /// not form a valid GraphQL endpoint URL.
    pub fn new(
        config: &ShopifyAdminConfig,
        client: reqwest::Client,
    ) -> Result<Self, AdminShopifyError> {
        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                endpoint: config.graphql_endpoint()?,
                access_token: config.access_token.clone(),
            }),
        })
    }

    /// Execute a GraphQL mutation and decode its `data` member.
    ///
    /// # Errors
    ///
    /// - `AdminShopifyError::Transport` if the HTTP exchange fails or
    ///   Shopify answers with a non-2xx status
    /// - `AdminShopifyError::GraphQL` if the response carries non-empty
    ///   `errors` (array, string or object) or no `data`
    /// - `AdminShopifyError::Parse` if `data` does not match `T`
    #[instrument(skip(self, query, variables))]
    pub(crate) async fn mutate<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, AdminShopifyError> {
        let request = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&GraphQLRequest { query, variables });

        let body = fetch_json(request).await.map_err(|err| {
            tracing::warn!(status = ?err.status(), "Shopify Admin API request failed");
            AdminShopifyError::Transport {
                status: err.status(),
                details: err.details(),
            }
        })?;

        let response: GraphQLResponse = serde_json::from_value(body)?;

        let converted_errors = response.errors.map(graphql_errors).unwrap_or_default();
        if !converted_errors.is_empty() {
            tracing::warn!(count = converted_errors.len(), "Shopify returned GraphQL errors");
            return Err(AdminShopifyError::GraphQL(converted_errors));
        }

        match response.data {
            Some(data) if !data.is_null() => Ok(serde_json::from_value(data)?),
            _ => Err(AdminShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])),
        }
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::test_support::{GRAPHQL_PATH, TEST_ADMIN_TOKEN, admin_client_for};
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Echo {
        ok: bool,
    }

    #[tokio::test]
    async fn test_mutate_sends_token_and_variables() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(header("x-shopify-access-token", TEST_ADMIN_TOKEN))
            .and(body_partial_json(json!({ "variables": { "id": "gid://shopify/DraftOrder/1" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "ok": true } })))
            .expect(1)
            .mount(&server)
            .await;

        let echo: Echo = admin_client_for(&server)
            .mutate("mutation { ok }", json!({ "id": "gid://shopify/DraftOrder/1" }))
            .await
            .unwrap();
        assert!(echo.ok);
    }

    #[tokio::test]
    async fn test_mutate_graphql_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{
                    "message": "Field 'nope' doesn't exist on type 'Mutation'",
                    "locations": [{ "line": 1, "column": 12 }],
                    "path": ["mutation", "nope"]
                }]
            })))
            .mount(&server)
            .await;

        let err = admin_client_for(&server)
            .mutate::<Echo>("mutation { nope }", json!({}))
            .await
            .unwrap_err();
        match err {
            AdminShopifyError::GraphQL(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].locations[0].column, 12);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mutate_empty_errors_array_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "ok": true }, "errors": [] })),
            )
            .mount(&server)
            .await;

        let echo: Echo = admin_client_for(&server)
            .mutate("mutation { ok }", json!({}))
            .await
            .unwrap();
        assert!(echo.ok);
    }

    #[tokio::test]
    async fn test_mutate_string_errors_member() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "errors": "Throttled" })))
            .mount(&server)
            .await;

        let err = admin_client_for(&server)
            .mutate::<Echo>("mutation { ok }", json!({}))
            .await
            .unwrap_err();
        match err {
            AdminShopifyError::GraphQL(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Throttled");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_graphql_errors_shapes() {
        let object = graphql_errors(json!({ "query": "Required parameter missing" }));
        assert_eq!(object.len(), 1);
        assert_eq!(object[0].message, r#"{"query":"Required parameter missing"}"#);

        let mixed = graphql_errors(json!([{ "message": "Access denied" }, "Throttled"]));
        assert_eq!(mixed[0].message, "Access denied");
        assert_eq!(mixed[1].message, "Throttled");

        for empty in [json!(null), json!(""), json!([]), json!({})] {
            assert!(graphql_errors(empty).is_empty());
        }
    }

    #[tokio::test]
    async fn test_mutate_missing_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
            .mount(&server)
            .await;

        let err = admin_client_for(&server)
            .mutate::<Echo>("mutation { ok }", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminShopifyError::GraphQL(_)));
    }

    #[tokio::test]
    async fn test_mutate_http_failure_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "errors": "[API] Invalid API key or access token" })),
            )
            .mount(&server)
            .await;

        let err = admin_client_for(&server)
            .mutate::<Echo>("mutation { ok }", json!({}))
            .await
            .unwrap_err();
        match err {
            AdminShopifyError::Transport { status, details } => {
                assert_eq!(status, Some(401));
                assert_eq!(details["status"], 401);
                assert_eq!(details["body"]["errors"], "[API] Invalid API key or access token");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
