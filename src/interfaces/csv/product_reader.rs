use crate::domain::product::NewProduct;
use crate::error::{Result, ShopError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ProductRecord {
    name: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    #[serde(default)]
    image_url: String,
}

/// Reads catalog entries from a CSV source with a
/// `name,description,price,image_url` header.
///
/// Wraps `csv::Reader`, trimming whitespace and tolerating short rows.
pub struct ProductReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ProductReader<R> {
    /// Creates a new `ProductReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and validates products.
    pub fn products(self) -> impl Iterator<Item = Result<NewProduct>> {
        self.reader.into_deserialize().map(|result| {
            let record: ProductRecord = result.map_err(ShopError::from)?;
            NewProduct::new(
                record.name,
                record.description,
                record.price,
                record.image_url,
            )
        })
    }
}
