//! Finalize-order request body and its validation.
//!
//! Validation is pure and collects every violation so the storefront can fix
//! the whole form in one round trip.

use paypal_shopify_bridge_core::{GlobalId, NormalizedAddress};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of `POST /api/shopify/order-from-paypal`.
///
/// Every field is kept as raw JSON: storefront scripts send numbers and
/// strings interchangeably, and [`FinalizeOrderRequest::validate`] reports
/// every problem at once, including wrongly typed fields, instead of failing
/// on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FinalizeOrderRequest {
    pub line_items: Value,
    pub address: Value,
    pub shipping_label: Value,
    pub shipping_price: Option<Value>,
    #[serde(rename = "paypalOrderId")]
    pub paypal_order_id: Value,
    #[serde(rename = "paypalCaptureId")]
    pub paypal_capture_id: Value,
}

/// A request that passed validation, with every field in its final form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub line_items: Vec<ValidatedLineItem>,
    pub address: NormalizedAddress,
    pub shipping_label: String,
    /// `None` when no shipping line should be emitted.
    pub shipping_price: Option<String>,
    pub paypal_order_id: String,
    pub paypal_capture_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLineItem {
    pub variant_id: GlobalId,
    pub quantity: i64,
    pub price: Option<String>,
}

impl FinalizeOrderRequest {
    /// Check the request and convert it to a [`ValidatedOrder`].
    ///
    /// # Errors
    ///
    /// Returns every violation found, one human-readable entry each.
    pub fn validate(self) -> Result<ValidatedOrder, Vec<String>> {
        let mut violations = Vec::new();

        let line_items = match &self.line_items {
            Value::Array(items) if !items.is_empty() => items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| validate_line_item(index, item, &mut violations))
                .collect(),
            _ => {
                violations.push("line_items must be a non-empty array".to_string());
                Vec::new()
            }
        };

        let address = validate_address(&self.address, &mut violations);

        let shipping_label = text_field("shipping_label", &self.shipping_label, &mut violations);
        if shipping_label.as_deref() == Some("") {
            violations.push("shipping_label is required".to_string());
        }

        let shipping_price = match self.shipping_price {
            None => {
                violations.push("shipping_price is required".to_string());
                None
            }
            Some(value) => match scalar_to_string(&value) {
                Some(price) if price.is_empty() => None,
                Some(price) => Some(price),
                None => {
                    violations.push("shipping_price must be a number or a string".to_string());
                    None
                }
            },
        };

        let paypal_order_id = text_field("paypalOrderId", &self.paypal_order_id, &mut violations);
        let paypal_capture_id =
            text_field("paypalCaptureId", &self.paypal_capture_id, &mut violations);

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(ValidatedOrder {
            line_items,
            address,
            shipping_label: shipping_label.unwrap_or_default(),
            shipping_price,
            paypal_order_id: paypal_order_id.unwrap_or_default(),
            paypal_capture_id: paypal_capture_id.unwrap_or_default(),
        })
    }
}

/// Optional text field; `None` (with a violation) when it is not a scalar.
fn text_field(name: &str, value: &Value, violations: &mut Vec<String>) -> Option<String> {
    let text = scalar_to_string(value);
    if text.is_none() {
        violations.push(format!("{name} must be a string"));
    }
    text
}

/// Build the address, reporting a wrongly typed field once rather than also
/// as missing.
fn validate_address(value: &Value, violations: &mut Vec<String>) -> NormalizedAddress {
    let empty = Map::new();
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => &empty,
        _ => {
            violations.push("address must be an object".to_string());
            &empty
        }
    };

    let mut invalid = Vec::new();
    let address = NormalizedAddress {
        first_name: address_field(fields, "firstName", &mut invalid),
        last_name: address_field(fields, "lastName", &mut invalid),
        address1: address_field(fields, "address1", &mut invalid),
        city: address_field(fields, "city", &mut invalid),
        zip: address_field(fields, "zip", &mut invalid),
        country: address_field(fields, "country", &mut invalid),
        phone: address_field(fields, "phone", &mut invalid),
        email: address_field(fields, "email", &mut invalid),
    };

    violations.extend(
        invalid
            .iter()
            .map(|field| format!("address.{field} must be a string or a number")),
    );
    violations.extend(
        address
            .missing_required_fields()
            .into_iter()
            .filter(|field| !invalid.contains(field))
            .map(|field| format!("address.{field} is required")),
    );

    address
}

fn address_field(
    fields: &Map<String, Value>,
    name: &'static str,
    invalid: &mut Vec<&'static str>,
) -> String {
    match fields.get(name).map_or(Some(String::new()), scalar_to_string) {
        Some(text) => text,
        None => {
            invalid.push(name);
            String::new()
        }
    }
}

fn validate_line_item(
    index: usize,
    item: &Value,
    violations: &mut Vec<String>,
) -> Option<ValidatedLineItem> {
    let Value::Object(fields) = item else {
        violations.push(format!("line_items[{index}] must be an object"));
        return None;
    };
    let field = |name: &str| fields.get(name).unwrap_or(&Value::Null);

    let variant_id = match scalar_to_string(field("variant_id")) {
        Some(raw) if !raw.trim().is_empty() => match GlobalId::variant_from_input(&raw) {
            Ok(gid) => Some(gid),
            Err(err) => {
                violations.push(format!("line_items[{index}].variant_id is invalid: {err}"));
                None
            }
        },
        _ => {
            violations.push(format!("line_items[{index}].variant_id is required"));
            None
        }
    };

    let quantity = parse_quantity(field("quantity"));
    if quantity.is_none() {
        violations.push(format!(
            "line_items[{index}].quantity must be a positive integer"
        ));
    }

    let price = scalar_to_string(field("price")).filter(|price| !price.is_empty());

    Some(ValidatedLineItem {
        variant_id: variant_id?,
        quantity: quantity?,
        price,
    })
}

/// Positive integer from a JSON number or a numeric string.
fn parse_quantity(value: &Value) -> Option<i64> {
    let quantity = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (quantity > 0).then_some(quantity)
}

/// String form of a JSON string or number; `null` maps to `""`.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "line_items": [{ "variant_id": 987654, "quantity": 2, "price": "19.99" }],
            "address": {
                "firstName": "Jane",
                "lastName": "Q Public",
                "address1": "1 Main St",
                "city": "Springfield",
                "zip": "00001",
                "country": "US",
                "email": "j@x.com"
            },
            "shipping_label": "Standard",
            "shipping_price": 5,
            "paypalOrderId": "ORDER1",
            "paypalCaptureId": "CAP1"
        })
    }

    fn request(body: Value) -> FinalizeOrderRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let order = request(valid_body()).validate().unwrap();
        assert_eq!(
            order.line_items,
            vec![ValidatedLineItem {
                variant_id: GlobalId::product_variant(987_654),
                quantity: 2,
                price: Some("19.99".to_string()),
            }]
        );
        assert_eq!(order.shipping_price.as_deref(), Some("5"));
        assert_eq!(order.paypal_capture_id, "CAP1");
    }

    #[test]
    fn test_one_entry_per_missing_address_field() {
        let mut body = valid_body();
        body["address"]["city"] = json!("");
        body["address"]["zip"] = Value::Null;
        body["address"]
            .as_object_mut()
            .unwrap()
            .remove("country");

        let violations = request(body).validate().unwrap_err();
        assert_eq!(
            violations,
            vec![
                "address.city is required",
                "address.zip is required",
                "address.country is required",
            ]
        );
    }

    #[test]
    fn test_collects_all_violations() {
        let violations = request(json!({})).validate().unwrap_err();
        assert_eq!(violations.len(), 1 + 6 + 1 + 1);
        assert_eq!(violations[0], "line_items must be a non-empty array");
        assert!(violations.contains(&"shipping_label is required".to_string()));
        assert!(violations.contains(&"shipping_price is required".to_string()));
    }

    #[test]
    fn test_line_item_violations_are_indexed() {
        let mut body = valid_body();
        body["line_items"] = json!([
            { "variant_id": "1", "quantity": 1 },
            { "quantity": 0 },
            { "variant_id": "gid://shopify/", "quantity": "abc" }
        ]);

        let violations = request(body).validate().unwrap_err();
        assert_eq!(
            violations,
            vec![
                "line_items[1].variant_id is required",
                "line_items[1].quantity must be a positive integer",
                "line_items[2].variant_id is invalid: global id must have the form gid://shopify/<resource>/<id>",
                "line_items[2].quantity must be a positive integer",
            ]
        );
    }

    #[test]
    fn test_string_quantity_and_gid_passthrough() {
        let mut body = valid_body();
        body["line_items"] = json!([
            { "variant_id": "gid://shopify/ProductVariant/42", "quantity": " 3 " }
        ]);

        let order = request(body).validate().unwrap();
        assert_eq!(order.line_items[0].variant_id.as_str(), "gid://shopify/ProductVariant/42");
        assert_eq!(order.line_items[0].quantity, 3);
        assert_eq!(order.line_items[0].price, None);
    }

    #[test]
    fn test_shipping_price_zero_is_kept() {
        let mut body = valid_body();
        body["shipping_price"] = json!(0);
        let order = request(body).validate().unwrap();
        assert_eq!(order.shipping_price.as_deref(), Some("0"));
    }

    #[test]
    fn test_shipping_price_empty_string_means_no_shipping_line() {
        let mut body = valid_body();
        body["shipping_price"] = json!("");
        let order = request(body).validate().unwrap();
        assert_eq!(order.shipping_price, None);
    }

    #[test]
    fn test_shipping_price_null_is_a_violation() {
        let mut body = valid_body();
        body["shipping_price"] = Value::Null;
        let violations = request(body).validate().unwrap_err();
        assert_eq!(violations, vec!["shipping_price is required"]);
    }

    #[test]
    fn test_shipping_price_must_be_scalar() {
        let mut body = valid_body();
        body["shipping_price"] = json!({ "amount": 5 });
        let violations = request(body).validate().unwrap_err();
        assert_eq!(violations, vec!["shipping_price must be a number or a string"]);
    }

    #[test]
    fn test_wrongly_typed_containers_are_violations() {
        let violations = request(json!({
            "line_items": "abc",
            "address": "123 Main",
            "shipping_label": "",
            "shipping_price": null
        }))
        .validate()
        .unwrap_err();

        assert_eq!(
            violations,
            vec![
                "line_items must be a non-empty array",
                "address must be an object",
                "address.firstName is required",
                "address.lastName is required",
                "address.address1 is required",
                "address.city is required",
                "address.zip is required",
                "address.country is required",
                "shipping_label is required",
                "shipping_price is required",
            ]
        );
    }

    #[test]
    fn test_non_object_line_item_is_indexed() {
        let mut body = valid_body();
        body["line_items"] = json!([5, { "variant_id": "abc/def", "quantity": 1 }]);

        let violations = request(body).validate().unwrap_err();
        assert_eq!(
            violations,
            vec![
                "line_items[0] must be an object",
                "line_items[1].variant_id is invalid: variant id must be numeric or a gid://shopify/ global id",
            ]
        );
    }

    #[test]
    fn test_wrongly_typed_fields_are_reported_once() {
        let mut body = valid_body();
        body["address"]["city"] = json!({ "name": "Springfield" });
        body["address"]["zip"] = json!(["00001"]);
        body["shipping_label"] = json!(["Standard"]);
        body["paypalOrderId"] = json!({});

        let violations = request(body).validate().unwrap_err();
        assert_eq!(
            violations,
            vec![
                "address.city must be a string or a number",
                "address.zip must be a string or a number",
                "shipping_label must be a string",
                "paypalOrderId must be a string",
            ]
        );
    }

    #[test]
    fn test_numeric_address_fields_are_stringified() {
        let mut body = valid_body();
        body["address"]["zip"] = json!(1001);
        body["address"]["phone"] = json!(5_550_100);

        let order = request(body).validate().unwrap();
        assert_eq!(order.address.zip, "1001");
        assert_eq!(order.address.phone, "5550100");
    }

    #[test]
    fn test_missing_audit_ids_default_to_empty() {
        let mut body = valid_body();
        let object = body.as_object_mut().unwrap();
        object.remove("paypalOrderId");
        object.remove("paypalCaptureId");

        let order = request(body).validate().unwrap();
        assert_eq!(order.paypal_order_id, "");
        assert_eq!(order.paypal_capture_id, "");
    }
}
