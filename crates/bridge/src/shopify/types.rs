//! Input and payload types for the draft order mutations.

use paypal_shopify_bridge_core::GlobalId;
use serde::{Deserialize, Serialize};

// =============================================================================
// Mutation inputs
// =============================================================================

/// `DraftOrderInput` for `draftOrderCreate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderInput {
    pub line_items: Vec<DraftOrderLineItemInput>,
    pub shipping_address: MailingAddressInput,
    pub billing_address: MailingAddressInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_line: Option<ShippingLineInput>,
    pub note: String,
    pub tags: Vec<String>,
}

/// A variant line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderLineItemInput {
    pub variant_id: GlobalId,
    pub quantity: i64,
    /// Unit price as a decimal string; Shopify uses the variant price when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_unit_price: Option<String>,
}

/// `MailingAddressInput` used for both shipping and billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailingAddressInput {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Custom shipping line (`title`, `price`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingLineInput {
    pub title: String,
    pub price: String,
}

// =============================================================================
// Mutation payloads
// =============================================================================

/// A mutation `userErrors` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// `data` member of a `draftOrderCreate` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderCreateData {
    pub draft_order_create: Option<DraftOrderCreatePayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderCreatePayload {
    pub draft_order: Option<DraftOrderRef>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftOrderRef {
    pub id: String,
}

/// `data` member of a `draftOrderComplete` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderCompleteData {
    pub draft_order_complete: Option<DraftOrderCompletePayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderCompletePayload {
    pub draft_order: Option<CompletedDraftOrder>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletedDraftOrder {
    pub id: String,
    pub order: Option<OrderRef>,
}

/// The real order a completed draft turned into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRef {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_order_input_omits_absent_optionals() {
        let input = DraftOrderInput {
            line_items: vec![DraftOrderLineItemInput {
                variant_id: GlobalId::product_variant(1),
                quantity: 2,
                original_unit_price: None,
            }],
            shipping_address: MailingAddressInput {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                address1: "1 Road".to_string(),
                city: "Town".to_string(),
                zip: "123".to_string(),
                country: "US".to_string(),
                phone: None,
            },
            billing_address: MailingAddressInput {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                address1: "1 Road".to_string(),
                city: "Town".to_string(),
                zip: "123".to_string(),
                country: "US".to_string(),
                phone: None,
            },
            email: None,
            shipping_line: None,
            note: "n".to_string(),
            tags: vec!["paypal".to_string()],
        };

        let value = serde_json::to_value(&input).unwrap_or_default();
        assert_eq!(
            value["lineItems"],
            json!([{ "variantId": "gid://shopify/ProductVariant/1", "quantity": 2 }])
        );
        assert!(value.get("shippingLine").is_none());
        assert!(value.get("email").is_none());
        assert!(value["shippingAddress"].get("phone").is_none());
    }

    #[test]
    fn test_complete_payload_deserializes() {
        let data: DraftOrderCompleteData = serde_json::from_value(json!({
            "draftOrderComplete": {
                "draftOrder": {
                    "id": "gid://shopify/DraftOrder/9",
                    "order": { "id": "gid://shopify/Order/77", "name": "#1077" }
                },
                "userErrors": []
            }
        }))
        .unwrap_or_else(|e| panic!("{e}"));

        let order = data
            .draft_order_complete
            .and_then(|p| p.draft_order)
            .and_then(|d| d.order);
        assert_eq!(
            order,
            Some(OrderRef {
                id: "gid://shopify/Order/77".to_string(),
                name: "#1077".to_string(),
            })
        );
    }
}
