use super::product::Product;
use crate::error::ShopError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one cart. Shared-scope deployments only ever use
/// [`CartId::shared`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartId(String);

impl CartId {
    const SHARED: &'static str = "shared";
    /// Longest accepted session, in bytes.
    pub const MAX_SESSION_LEN: usize = 256;

    pub fn shared() -> Self {
        Self(Self::SHARED.to_string())
    }

    pub fn session(session: &str) -> Result<Self, ShopError> {
        let session = session.trim();
        if session.is_empty() {
            return Err(ShopError::validation("session", "session is required"));
        }
        if session.len() > Self::MAX_SESSION_LEN {
            return Err(ShopError::validation("session", "session is too long"));
        }
        Ok(Self(format!("session:{session}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A strictly positive line-item quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: i64) -> Result<Self, ShopError> {
        match u32::try_from(value) {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(ShopError::validation(
                "quantity",
                "quantity must be a positive integer",
            )),
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ShopError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// A stored line item. Product data is not copied in; it is joined when the
/// cart is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: u32,
    pub product_id: u32,
    pub quantity: Quantity,
}

/// A line item joined with the product it references, as of read time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: u32,
    pub product_id: u32,
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLine {
    pub fn join(item: CartItem, product: Product) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            product,
            quantity: item.quantity,
        }
    }
}
