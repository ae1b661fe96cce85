//! Mapping of a validated request onto Shopify's `DraftOrderInput`.

use crate::shopify::{
    DraftOrderInput, DraftOrderLineItemInput, MailingAddressInput, ShippingLineInput,
};

use super::request::ValidatedOrder;

/// Tag attached to every order created by the bridge.
pub const ORDER_TAG: &str = "paypal";

/// Build the `draftOrderCreate` input for a validated request.
#[must_use]
pub fn draft_order_input(order: &ValidatedOrder) -> DraftOrderInput {
    let address = &order.address;
    let mailing_address = MailingAddressInput {
        first_name: address.first_name.clone(),
        last_name: address.last_name.clone(),
        address1: address.address1.clone(),
        city: address.city.clone(),
        zip: address.zip.clone(),
        country: address.country.clone(),
        phone: non_empty(&address.phone),
    };

    DraftOrderInput {
        line_items: order
            .line_items
            .iter()
            .map(|item| DraftOrderLineItemInput {
                variant_id: item.variant_id.clone(),
                quantity: item.quantity,
                original_unit_price: item.price.clone(),
            })
            .collect(),
        shipping_address: mailing_address.clone(),
        billing_address: mailing_address,
        email: non_empty(&address.email),
        shipping_line: order.shipping_price.as_ref().map(|price| ShippingLineInput {
            title: order.shipping_label.clone(),
            price: price.clone(),
        }),
        note: audit_note(&order.paypal_order_id, &order.paypal_capture_id),
        tags: vec![ORDER_TAG.to_string()],
    }
}

/// Note linking the Shopify order back to its PayPal payment.
#[must_use]
pub fn audit_note(paypal_order_id: &str, paypal_capture_id: &str) -> String {
    format!("PayPal order: {paypal_order_id} | capture: {paypal_capture_id}")
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use paypal_shopify_bridge_core::{GlobalId, NormalizedAddress};
    use serde_json::json;

    use super::*;
    use crate::orders::request::ValidatedLineItem;

    fn order(shipping_price: Option<&str>) -> ValidatedOrder {
        ValidatedOrder {
            line_items: vec![
                ValidatedLineItem {
                    variant_id: GlobalId::product_variant(987_654),
                    quantity: 2,
                    price: Some("19.99".to_string()),
                },
                ValidatedLineItem {
                    variant_id: GlobalId::product_variant(11),
                    quantity: 1,
                    price: None,
                },
            ],
            address: NormalizedAddress {
                first_name: "Jane".to_string(),
                last_name: "Q Public".to_string(),
                address1: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                zip: "00001".to_string(),
                country: "US".to_string(),
                phone: String::new(),
                email: "j@x.com".to_string(),
            },
            shipping_label: "Standard".to_string(),
            shipping_price: shipping_price.map(String::from),
            paypal_order_id: "ORDER1".to_string(),
            paypal_capture_id: "CAP1".to_string(),
        }
    }

    #[test]
    fn test_draft_order_input_shape() {
        let value = serde_json::to_value(draft_order_input(&order(Some("5")))).unwrap();

        assert_eq!(
            value["lineItems"],
            json!([
                { "variantId": "gid://shopify/ProductVariant/987654", "quantity": 2, "originalUnitPrice": "19.99" },
                { "variantId": "gid://shopify/ProductVariant/11", "quantity": 1 }
            ])
        );
        assert_eq!(value["shippingAddress"], value["billingAddress"]);
        assert_eq!(value["shippingAddress"]["lastName"], "Q Public");
        assert!(value["shippingAddress"].get("phone").is_none());
        assert_eq!(value["email"], "j@x.com");
        assert_eq!(value["shippingLine"], json!({ "title": "Standard", "price": "5" }));
        assert_eq!(value["note"], "PayPal order: ORDER1 | capture: CAP1");
        assert_eq!(value["tags"], json!(["paypal"]));
    }

    #[test]
    fn test_zero_shipping_price_emits_shipping_line() {
        let value = serde_json::to_value(draft_order_input(&order(Some("0")))).unwrap();
        assert_eq!(value["shippingLine"]["price"], "0");
    }

    #[test]
    fn test_no_shipping_price_omits_shipping_line_key() {
        let value = serde_json::to_value(draft_order_input(&order(None))).unwrap();
        assert!(value.get("shippingLine").is_none());
    }

    #[test]
    fn test_phone_is_forwarded_when_present() {
        let mut order = order(None);
        order.address.phone = "+1 555 0100".to_string();
        order.address.email = String::new();

        let input = draft_order_input(&order);
        assert_eq!(input.shipping_address.phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(input.billing_address.phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(input.email, None);
    }

    #[test]
    fn test_audit_note_with_empty_ids() {
        assert_eq!(audit_note("", ""), "PayPal order:  | capture: ");
    }
}
