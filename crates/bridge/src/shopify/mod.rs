//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module holds the high-privilege Shopify Admin API token.**
//!
//! The bridge only uses it for two mutations (`draftOrderCreate`,
//! `draftOrderComplete`), but the token itself can manage the whole store.
//! Keep it out of logs and error details.
//!
//! # Architecture
//!
//! - Raw GraphQL mutation documents with `serde` typed payloads
//! - Direct API calls to Shopify (no local state, no retries)
//! - Top-level GraphQL `errors` fail the call; mutation `userErrors` are
//!   returned to the caller as data
//!
//! # Example
//!
//! ```rust,ignore
//! use paypal_shopify_bridge::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify, http.clone())?;
//!
//! let created = client.draft_order_create(&input).await?;
//! let completed = client.draft_order_complete(&draft_id).await?;
//! ```

mod admin;
pub mod types;

pub use admin::AdminClient;
pub use types::*;

#[cfg(test)]
pub(crate) use admin::test_support as admin_test_support;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// The HTTP exchange failed (network failure or non-2xx response).
    #[error("Shopify transport error{}", format_status(*.status))]
    Transport {
        /// Upstream status, if a response was received.
        status: Option<u16>,
        /// Upstream body or network error description.
        details: serde_json::Value,
    },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// Response `data` did not match the expected payload shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured store/API version does not form a valid endpoint.
    #[error("Invalid Admin API endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_status(status: Option<u16>) -> String {
    status.map_or_else(String::new, |s| format!(" (HTTP {s})"))
}
