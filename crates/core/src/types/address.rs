//! Normalized shipping/contact address.
//!
//! The same shape is produced from a PayPal capture and accepted back from the
//! storefront when it asks for the Shopify order to be created, so both sides
//! agree on field names (`camelCase` on the wire).

use serde::{Deserialize, Deserializer, Serialize};

/// A shipping/contact address in the bridge's canonical shape.
///
/// Every field is a plain string; an absent source value becomes `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizedAddress {
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address1: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub zip: String,
    #[serde(deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
}

impl NormalizedAddress {
    /// Wire names of the fields an order cannot be created without.
    pub const REQUIRED_FIELDS: [&'static str; 6] =
        ["firstName", "lastName", "address1", "city", "zip", "country"];

    /// Wire names of required fields that are empty.
    ///
    /// Returned in [`Self::REQUIRED_FIELDS`] order, one entry per field.
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.first_name,
            &self.last_name,
            &self.address1,
            &self.city,
            &self.zip,
            &self.country,
        ];

        Self::REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Deserialize a string field that storefront scripts sometimes send as a
/// number (postal codes, phone numbers). `null` and `false` become `""`.
///
/// # Errors
///
/// Fails for arrays and objects.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(true) => Ok("true".to_string()),
        serde_json::Value::Bool(false) => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a string, found {}",
            json_kind(&other)
        ))),
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
