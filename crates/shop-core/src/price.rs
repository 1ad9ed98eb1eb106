//! # Price Identifiers
//!
//! Validated price identifier taken from the checkout route's path.
//! Identifiers are checked locally before anything is sent to the provider.

use crate::error::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on identifier length, in bytes
pub const MAX_PRICE_ID_LEN: usize = 255;

/// A provider price identifier (e.g., "price_1NxyzABC")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceId(String);

impl PriceId {
    /// Parse and validate a raw identifier.
    ///
    /// Accepts 1..=255 bytes of ASCII alphanumerics, `_` and `-`.
    pub fn parse(raw: &str) -> ShopResult<Self> {
        let reject = |reason: &str| ShopError::InvalidPriceId {
            price_id: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(reject("must not be empty"));
        }

        if raw.len() > MAX_PRICE_ID_LEN {
            return Err(reject("too long"));
        }

        if let Some(c) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(reject(&format!("unexpected character {:?}", c)));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PriceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PriceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
