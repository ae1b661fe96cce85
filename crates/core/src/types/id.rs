//! Shopify global identifiers.
//!
//! Shopify's Admin GraphQL API addresses every object by a scheme-prefixed
//! string such as `gid://shopify/ProductVariant/987654`. Storefront scripts
//! usually only know the numeric tail, so the bridge has to build the full form.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Scheme prefix shared by all Shopify global IDs.
pub const GID_PREFIX: &str = "gid://shopify/";

/// Errors that can occur when parsing a [`GlobalId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GlobalIdError {
    /// The input string is empty.
    #[error("global id cannot be empty")]
    Empty,
    /// The input does not start with `gid://shopify/`.
    #[error("global id must start with gid://shopify/")]
    MissingPrefix,
    /// The input has no `<resource>/<id>` tail.
    #[error("global id must have the form gid://shopify/<resource>/<id>")]
    Malformed,
    /// A bare variant ID that is not all digits.
    #[error("variant id must be numeric or a gid://shopify/ global id")]
    NotNumeric,
}

/// A Shopify global identifier (`gid://shopify/<resource>/<id>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalId(String);

impl GlobalId {
    /// Build a global ID from a resource type and its numeric/opaque tail.
    ///
    /// ```
    /// use paypal_shopify_bridge_core::GlobalId;
    ///
    /// let gid = GlobalId::new("ProductVariant", "987654");
    /// assert_eq!(gid.as_str(), "gid://shopify/ProductVariant/987654");
    /// ```
    #[must_use]
    pub fn new(resource: &str, id: impl fmt::Display) -> Self {
        Self(format!("{GID_PREFIX}{resource}/{id}"))
    }

    /// Build a `ProductVariant` global ID.
    #[must_use]
    pub fn product_variant(id: impl fmt::Display) -> Self {
        Self::new("ProductVariant", id)
    }

    /// Accept either a full global ID or a bare variant ID.
    ///
    /// Inputs that already carry the `gid://` scheme pass through untouched
    /// (after validation); anything else must be a numeric variant ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is a malformed global ID, or
    /// is a bare ID containing anything but ASCII digits.
    pub fn variant_from_input(input: &str) -> Result<Self, GlobalIdError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(GlobalIdError::Empty);
        }
        if input.starts_with("gid://") {
            return Self::parse(input);
        }
        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GlobalIdError::NotNumeric);
        }
        Ok(Self::product_variant(input))
    }

    /// Parse a full global ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, lacks the Shopify prefix, or
    /// has no resource/id tail.
    pub fn parse(input: &str) -> Result<Self, GlobalIdError> {
        if input.is_empty() {
            return Err(GlobalIdError::Empty);
        }
        let tail = input
            .strip_prefix(GID_PREFIX)
            .ok_or(GlobalIdError::MissingPrefix)?;
        match tail.split_once('/') {
            Some((resource, id)) if !resource.is_empty() && !id.is_empty() => {
                Ok(Self(input.to_string()))
            }
            _ => Err(GlobalIdError::Malformed),
        }
    }

    /// The resource type (e.g. `ProductVariant`).
    #[must_use]
    pub fn resource(&self) -> &str {
        self.tail().split_once('/').map_or("", |(resource, _)| resource)
    }

    /// The trailing object ID (e.g. `987654`).
    #[must_use]
    pub fn id(&self) -> &str {
        self.tail().split_once('/').map_or("", |(_, id)| id)
    }

    /// Get the full ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn tail(&self) -> &str {
        self.0.strip_prefix(GID_PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<GlobalId> for String {
    fn from(id: GlobalId) -> Self {
        id.0
    }
}
