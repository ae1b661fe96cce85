//! Normalization of PayPal capture responses.
//!
//! A capture response nests the buyer's shipping details under the first
//! purchase unit and the buyer's own name/email under `payer`. This module
//! reduces that shape to a [`NormalizedAddress`] plus the capture ID. It is a
//! pure transform: absent paths become empty strings and nothing here fails.

use paypal_shopify_bridge_core::{CaptureStatus, NormalizedAddress};
use serde::Serialize;
use serde_json::Value;

/// Capture ID and buyer address extracted from a capture response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCapture {
    pub capture_id: String,
    pub address: NormalizedAddress,
}

/// Reduce a capture response to its capture ID and buyer address.
#[must_use]
pub fn normalize(raw: &Value) -> NormalizedCapture {
    let unit = first_purchase_unit(raw);

    let full_name = str_at(unit, "/shipping/name/full_name").trim();
    let given_name = str_at(raw, "/payer/name/given_name");
    let surname = str_at(raw, "/payer/name/surname");

    let (first_name, last_name) = if full_name.is_empty() {
        (given_name.to_string(), surname.to_string())
    } else {
        split_full_name(full_name)
    };

    let address = NormalizedAddress {
        first_name,
        last_name,
        address1: str_at(unit, "/shipping/address/address_line_1").to_string(),
        city: str_at(unit, "/shipping/address/admin_area_2").to_string(),
        zip: str_at(unit, "/shipping/address/postal_code").to_string(),
        country: str_at(unit, "/shipping/address/country_code").to_string(),
        // Not present in capture responses
        phone: String::new(),
        email: str_at(raw, "/payer/email_address").to_string(),
    };

    NormalizedCapture {
        capture_id: capture_id(raw, unit),
        address,
    }
}

/// Capture status: top-level `status`, else the first capture's status.
#[must_use]
pub fn capture_status(raw: &Value) -> CaptureStatus {
    let top = str_at(raw, "/status");
    let status = if top.is_empty() {
        str_at(first_purchase_unit(raw), "/payments/captures/0/status")
    } else {
        top
    };
    CaptureStatus::from_raw(status)
}

/// Split on the first whitespace run: first token, then the rest rejoined
/// with single spaces.
fn split_full_name(full_name: &str) -> (String, String) {
    let mut tokens = full_name.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let rest = tokens.collect::<Vec<_>>().join(" ");
    (first, rest)
}

/// Completed capture, else any capture, else authorization, else order ID.
fn capture_id(raw: &Value, unit: &Value) -> String {
    let captures = unit
        .pointer("/payments/captures")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let completed = captures
        .iter()
        .find(|c| str_at(c, "/status") == "COMPLETED" && !str_at(c, "/id").is_empty());
    let any_capture = captures.iter().find(|c| !str_at(c, "/id").is_empty());

    [
        completed.map(|c| str_at(c, "/id")),
        any_capture.map(|c| str_at(c, "/id")),
        Some(str_at(unit, "/payments/authorizations/0/id")),
        Some(str_at(raw, "/id")),
    ]
    .into_iter()
    .flatten()
    .find(|id| !id.is_empty())
    .unwrap_or_default()
    .to_string()
}

fn first_purchase_unit(raw: &Value) -> &Value {
    raw.pointer("/purchase_units/0").unwrap_or(&Value::Null)
}

/// String at a JSON pointer, or `""` when absent or not a string.
fn str_at<'a>(value: &'a Value, pointer: &str) -> &'a str {
    value.pointer(pointer).and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn jane_capture() -> Value {
        json!({
            "status": "COMPLETED",
            "purchase_units": [{
                "shipping": {
                    "name": { "full_name": "Jane Q Public" },
                    "address": {
                        "address_line_1": "1 Main St",
                        "admin_area_2": "Springfield",
                        "postal_code": "00001",
                        "country_code": "US"
                    }
                },
                "payments": { "captures": [{ "id": "CAP1" }] }
            }],
            "payer": { "email_address": "j@x.com" }
        })
    }

    #[test]
    fn test_normalize_full_capture() {
        let normalized = normalize(&jane_capture());

        assert_eq!(normalized.capture_id, "CAP1");
        assert_eq!(
            normalized.address,
            NormalizedAddress {
                first_name: "Jane".to_string(),
                last_name: "Q Public".to_string(),
                address1: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                zip: "00001".to_string(),
                country: "US".to_string(),
                phone: String::new(),
                email: "j@x.com".to_string(),
            }
        );
    }

    #[test]
    fn test_normalize_serializes_camel_case() {
        let value = serde_json::to_value(normalize(&jane_capture())).unwrap_or_default();
        assert_eq!(value["captureId"], "CAP1");
        assert_eq!(value["address"]["lastName"], "Q Public");
    }

    #[test]
    fn test_missing_full_name_uses_payer_fields_verbatim() {
        let raw = json!({
            "purchase_units": [{ "shipping": { "address": { "address_line_1": "2 Elm" } } }],
            "payer": { "name": { "given_name": "Mary Ann", "surname": "van Dyke" } }
        });
        let address = normalize(&raw).address;
        assert_eq!(address.first_name, "Mary Ann");
        assert_eq!(address.last_name, "van Dyke");
    }

    #[test]
    fn test_blank_full_name_falls_back_to_payer() {
        let raw = json!({
            "purchase_units": [{ "shipping": { "name": { "full_name": "   " } } }],
            "payer": { "name": { "given_name": "Li", "surname": "Wei" } }
        });
        let address = normalize(&raw).address;
        assert_eq!(address.first_name, "Li");
        assert_eq!(address.last_name, "Wei");
    }

    #[test]
    fn test_full_name_whitespace_is_collapsed() {
        let raw = json!({
            "purchase_units": [{ "shipping": { "name": { "full_name": "  Ana \t Maria   Lopez " } } }]
        });
        let address = normalize(&raw).address;
        assert_eq!(address.first_name, "Ana");
        assert_eq!(address.last_name, "Maria Lopez");
    }

    #[test]
    fn test_single_token_name_has_empty_last_name() {
        let raw = json!({
            "purchase_units": [{ "shipping": { "name": { "full_name": "Cher" } } }]
        });
        let address = normalize(&raw).address;
        assert_eq!(address.first_name, "Cher");
        assert_eq!(address.last_name, "");
    }

    #[test]
    fn test_no_name_anywhere_is_empty() {
        let address = normalize(&json!({ "purchase_units": [{}] })).address;
        assert_eq!(address.first_name, "");
        assert_eq!(address.last_name, "");
    }

    #[test]
    fn test_empty_response_never_fails() {
        for raw in [json!({}), json!(null), json!({ "purchase_units": "oops" })] {
            let normalized = normalize(&raw);
            assert_eq!(normalized.capture_id, "");
            assert_eq!(normalized.address, NormalizedAddress::default());
        }
    }

    #[test]
    fn test_capture_id_prefers_completed_capture() {
        let raw = json!({
            "id": "ORDER",
            "purchase_units": [{
                "payments": {
                    "captures": [
                        { "id": "CAP-PENDING", "status": "PENDING" },
                        { "id": "CAP-DONE", "status": "COMPLETED" }
                    ]
                }
            }]
        });
        assert_eq!(normalize(&raw).capture_id, "CAP-DONE");
    }

    #[test]
    fn test_capture_id_falls_back_to_authorization_then_order() {
        let raw = json!({
            "id": "ORDER",
            "purchase_units": [{ "payments": { "authorizations": [{ "id": "AUTH1" }] } }]
        });
        assert_eq!(normalize(&raw).capture_id, "AUTH1");

        let raw = json!({ "id": "ORDER", "purchase_units": [{ "payments": { "captures": [{ "id": "" }] } }] });
        assert_eq!(normalize(&raw).capture_id, "ORDER");
    }

    #[test]
    fn test_capture_status_top_level_first() {
        let raw = json!({
            "status": "COMPLETED",
            "purchase_units": [{ "payments": { "captures": [{ "status": "PENDING" }] } }]
        });
        assert!(capture_status(&raw).is_completed());
    }

    #[test]
    fn test_capture_status_from_first_capture() {
        let raw = json!({
            "purchase_units": [{ "payments": { "captures": [{ "status": "COMPLETED" }] } }]
        });
        assert!(capture_status(&raw).is_completed());

        let raw = json!({
            "purchase_units": [{ "payments": { "captures": [{ "status": "DECLINED" }] } }]
        });
        assert_eq!(capture_status(&raw).as_str(), "DECLINED");
    }

    #[test]
    fn test_capture_status_missing_is_not_completed() {
        assert!(!capture_status(&json!({})).is_completed());
    }
}
