use crate::domain::ports::ProductStore;
use crate::domain::product::{NewProduct, Product};
use crate::error::{Entity, Result, ShopError};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Product catalog operations on top of a [`ProductStore`].
#[derive(Clone)]
pub struct Catalog {
    products: Arc<dyn ProductStore>,
}

impl Catalog {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Lists products, keeping only those priced at or above `min_price`
    /// when given.
    pub async fn list(&self, min_price: Option<Decimal>) -> Result<Vec<Product>> {
        let products = self.products.all().await?;
        Ok(match min_price {
            Some(min) => products
                .into_iter()
                .filter(|p| p.price.value() >= min)
                .collect(),
            None => products,
        })
    }

    pub async fn get(&self, id: u32) -> Result<Product> {
        self.products
            .get(id)
            .await?
            .ok_or_else(|| ShopError::not_found(Entity::Product, id))
    }

    pub async fn create(&self, product: NewProduct) -> Result<Product> {
        let product = self.products.insert(product).await?;
        tracing::info!(product_id = product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Replaces every field of an existing product.
    pub async fn update(&self, id: u32, fields: NewProduct) -> Result<Product> {
        let product = fields.with_id(id);
        if !self.products.update(product.clone()).await? {
            return Err(ShopError::not_found(Entity::Product, id));
        }
        tracing::info!(product_id = id, "product updated");
        Ok(product)
    }

    /// Deletes a product. Cart lines that still point at it disappear from
    /// cart listings.
    pub async fn delete(&self, id: u32) -> Result<Product> {
        let product = self
            .products
            .remove(id)
            .await?
            .ok_or_else(|| ShopError::not_found(Entity::Product, id))?;
        tracing::info!(product_id = id, "product deleted");
        Ok(product)
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.products.all().await?.is_empty())
    }
}
