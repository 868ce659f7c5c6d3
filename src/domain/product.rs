use crate::error::ShopError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A strictly positive product price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self, ShopError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ShopError::validation("price", "price must be positive"))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = ShopError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
}

/// The fields of a product before the store assigns it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
}

impl NewProduct {
    /// Validates raw product fields. The name must not be blank and the price
    /// must be positive.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        image_url: impl Into<String>,
    ) -> Result<Self, ShopError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ShopError::validation("name", "product name is required"));
        }
        Ok(Self {
            name,
            description: description.into(),
            price: Price::new(price)?,
            image_url: image_url.into(),
        })
    }

    pub fn with_id(self, id: u32) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
        }
    }
}
