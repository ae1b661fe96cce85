//! Draft order mutations.
//!
//! `userErrors` are part of the returned payload; deciding whether they are
//! fatal is left to the caller.

use serde_json::json;
use tracing::instrument;

use super::{AdminClient, queries};
use crate::shopify::{
    AdminShopifyError, DraftOrderCompleteData, DraftOrderCompletePayload, DraftOrderCreateData,
    DraftOrderCreatePayload, DraftOrderInput,
};

impl AdminClient {
    /// Create a draft order.
    ///
    /// Returns `None` when Shopify answers with a null `draftOrderCreate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns GraphQL errors.
    #[instrument(skip(self, input), fields(line_items = input.line_items.len()))]
    pub async fn draft_order_create(
        &self,
        input: &DraftOrderInput,
    ) -> Result<Option<DraftOrderCreatePayload>, AdminShopifyError> {
        let data: DraftOrderCreateData = self
            .mutate(queries::DRAFT_ORDER_CREATE, json!({ "input": input }))
            .await?;
        Ok(data.draft_order_create)
    }

    /// Complete a draft order.
    ///
    /// # Arguments
    ///
    /// * `id` - Draft order ID (e.g., `gid://shopify/DraftOrder/123`)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns GraphQL errors.
    #[instrument(skip(self), fields(draft_order_id = %id))]
    pub async fn draft_order_complete(
        &self,
        id: &str,
    ) -> Result<Option<DraftOrderCompletePayload>, AdminShopifyError> {
        let data: DraftOrderCompleteData = self
            .mutate(queries::DRAFT_ORDER_COMPLETE, json!({ "id": id }))
            .await?;
        Ok(data.draft_order_complete)
    }
}
