//! Money amounts and currency codes as the payment provider expects them.
//!
//! PayPal takes amounts as decimal strings (`"19.99"`) alongside an ISO 4217
//! currency code. Both are validated here but kept in their textual form so
//! the value sent upstream is exactly what the caller supplied.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Amount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input string is empty.
    #[error("amount cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("amount must be a decimal number (got {0:?})")]
    NotDecimal(String),
    /// The input is below zero.
    #[error("amount cannot be negative")]
    Negative,
}

/// A non-negative decimal amount kept in its original textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount {
    text: String,
    value: Decimal,
}

impl Amount {
    /// Parse an amount from its decimal string form.
    ///
    /// ```
    /// use paypal_shopify_bridge_core::Amount;
    ///
    /// assert_eq!(Amount::parse(" 19.99 ").unwrap().as_str(), "19.99");
    /// assert!(Amount::parse("").is_err());
    /// assert!(Amount::parse("ten").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal, or negative.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(AmountError::Empty);
        }
        let value =
            Decimal::from_str(text).map_err(|_| AmountError::NotDecimal(text.to_string()))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative);
        }
        Ok(Self {
            text: text.to_string(),
            value,
        })
    }

    /// The amount exactly as it will be sent upstream.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The parsed decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.value
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.text
    }
}

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("currency must be a three-letter ISO 4217 code (got {0:?})")]
pub struct CurrencyCodeError(pub String);

/// ISO 4217 currency code, stored upper-case.
///
/// Defaults to `USD`, the currency used when a caller omits one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a currency code, normalizing to upper case.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is exactly three ASCII letters.
    pub fn parse(input: &str) -> Result<Self, CurrencyCodeError> {
        let code = input.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(CurrencyCodeError(input.to_string()))
        }
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_keeps_original_text() {
        let amount = Amount::parse("10.50").unwrap();
        assert_eq!(amount.as_str(), "10.50");
        assert_eq!(amount.value(), Decimal::new(1050, 2));
    }

    #[test]
    fn test_amount_trims_whitespace() {
        assert_eq!(Amount::parse("  5 ").unwrap().as_str(), "5");
    }

    #[test]
    fn test_amount_rejects_empty() {
        assert_eq!(Amount::parse("").unwrap_err(), AmountError::Empty);
        assert_eq!(Amount::parse("   ").unwrap_err(), AmountError::Empty);
    }

    #[test]
    fn test_amount_rejects_non_decimal() {
        assert!(matches!(
            Amount::parse("12abc").unwrap_err(),
            AmountError::NotDecimal(_)
        ));
    }

    #[test]
    fn test_amount_rejects_negative() {
        assert_eq!(Amount::parse("-1.00").unwrap_err(), AmountError::Negative);
    }

    #[test]
    fn test_amount_allows_zero() {
        assert!(Amount::parse("0").is_ok());
        assert!(Amount::parse("-0").is_ok());
    }

    #[test]
    fn test_currency_default_is_usd() {
        assert_eq!(CurrencyCode::default().as_str(), "USD");
    }

    #[test]
    fn test_currency_normalizes_case() {
        assert_eq!(CurrencyCode::parse("eur").unwrap().as_str(), "EUR");
    }

    #[test]
    fn test_currency_rejects_bad_codes() {
        assert!(CurrencyCode::parse("US").is_err());
        assert!(CurrencyCode::parse("USDX").is_err());
        assert!(CurrencyCode::parse("U$D").is_err());
    }

    #[test]
    fn test_currency_deserialize_validates() {
        let ok: CurrencyCode = serde_json::from_str("\"gbp\"").unwrap();
        assert_eq!(ok.as_str(), "GBP");
        assert!(serde_json::from_str::<CurrencyCode>("\"pounds\"").is_err());
    }
}
