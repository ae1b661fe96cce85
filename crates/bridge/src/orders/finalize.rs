//! Two-step draft order creation.
//!
//! Completion is only attempted once creation returned a usable draft id.
//! There is no rollback: if completion fails the draft stays in Shopify and
//! is logged so staff can complete or delete it by hand.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::instrument;

use super::build::draft_order_input;
use super::request::FinalizeOrderRequest;
use crate::shopify::{AdminClient, AdminShopifyError, OrderRef, UserError};

/// Errors that can occur while finalizing an order.
#[derive(Debug, Error)]
pub enum FinalizeError {
    /// The request failed validation; nothing was sent to Shopify.
    #[error("Order request is invalid: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// `draftOrderCreate` returned user errors or no draft id.
    #[error("Draft order creation failed")]
    DraftCreate {
        /// `userErrors` list, or a message.
        details: Value,
    },

    /// `draftOrderComplete` returned user errors or no order.
    #[error("Draft order {draft_id} could not be completed")]
    DraftComplete {
        /// The draft left behind in Shopify.
        draft_id: String,
        /// `userErrors` list, or a message.
        details: Value,
    },

    /// The Admin API call itself failed.
    #[error(transparent)]
    Shopify(#[from] AdminShopifyError),
}

/// The order Shopify created from the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizedOrder {
    pub id: String,
    pub name: String,
}

impl From<OrderRef> for FinalizedOrder {
    fn from(order: OrderRef) -> Self {
        Self {
            id: order.id,
            name: order.name,
        }
    }
}

/// Validate the request, create a draft order and complete it.
///
/// # Errors
///
/// - `FinalizeError::Validation` before any network call
/// - `FinalizeError::DraftCreate` / `FinalizeError::DraftComplete` for
///   mutation `userErrors` or missing ids
/// - `FinalizeError::Shopify` for transport or GraphQL failures
#[instrument(
    skip(admin, request),
    fields(
        paypal_order_id = %request.paypal_order_id,
        paypal_capture_id = %request.paypal_capture_id,
    )
)]
pub async fn finalize_order(
    admin: &AdminClient,
    request: FinalizeOrderRequest,
) -> Result<FinalizedOrder, FinalizeError> {
    let order = request.validate().map_err(FinalizeError::Validation)?;
    let input = draft_order_input(&order);

    let created = admin.draft_order_create(&input).await?;
    let draft_id = match created {
        Some(payload) if !payload.user_errors.is_empty() => {
            tracing::warn!(errors = ?payload.user_errors, "draftOrderCreate returned user errors");
            return Err(FinalizeError::DraftCreate {
                details: user_errors_details(&payload.user_errors),
            });
        }
        Some(payload) => payload
            .draft_order
            .map(|draft| draft.id)
            .filter(|id| !id.is_empty()),
        None => None,
    }
    .ok_or_else(|| FinalizeError::DraftCreate {
        details: json!({ "message": "draftOrderCreate returned no draft order id" }),
    })?;

    tracing::info!(draft_order_id = %draft_id, "Draft order created");

    let completed = admin.draft_order_complete(&draft_id).await.inspect_err(|e| {
        tracing::warn!(draft_order_id = %draft_id, error = %e, "Draft order left incomplete");
    })?;

    let result = match completed {
        Some(payload) if !payload.user_errors.is_empty() => Err(user_errors_details(
            &payload.user_errors,
        )),
        Some(payload) => payload
            .draft_order
            .and_then(|draft| draft.order)
            .filter(|order| !order.id.is_empty())
            .ok_or_else(|| json!({ "message": "draftOrderComplete returned no order" })),
        None => Err(json!({ "message": "draftOrderComplete returned no order" })),
    };

    match result {
        Ok(order) => {
            tracing::info!(order_id = %order.id, order_name = %order.name, "Order finalized");
            Ok(order.into())
        }
        Err(details) => {
            tracing::warn!(draft_order_id = %draft_id, details = %details, "Draft order left incomplete");
            Err(FinalizeError::DraftComplete { draft_id, details })
        }
    }
}

fn user_errors_details(errors: &[UserError]) -> Value {
    serde_json::to_value(errors).unwrap_or(Value::Null)
}
