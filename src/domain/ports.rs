use super::cart::{CartId, CartItem, Quantity};
use super::payment::{NewPayment, Payment};
use super::product::{NewProduct, Product};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: NewProduct) -> Result<Product>;
    async fn get(&self, id: u32) -> Result<Option<Product>>;
    async fn all(&self) -> Result<Vec<Product>>;
    /// Replaces an existing product. Returns `false` when no product has
    /// that id.
    async fn update(&self, product: Product) -> Result<bool>;
    /// Deletes a product and returns it, or `None` when no product has that
    /// id. Cart items that reference it are left in place.
    async fn remove(&self, id: u32) -> Result<Option<Product>>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    async fn add(&self, cart: &CartId, product_id: u32, quantity: Quantity) -> Result<CartItem>;
    async fn items(&self, cart: &CartId) -> Result<Vec<CartItem>>;
    /// Removes every item of the cart. Clearing an empty cart succeeds.
    async fn clear(&self, cart: &CartId) -> Result<()>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert(&self, payment: NewPayment) -> Result<Payment>;
    async fn all(&self) -> Result<Vec<Payment>>;
    /// Deletes a payment. Only used to undo an insert whose checkout could
    /// not finish.
    async fn remove(&self, id: u32) -> Result<()>;
}

pub type ProductStoreBox = Box<dyn ProductStore>;
pub type CartStoreBox = Box<dyn CartStore>;
pub type PaymentStoreBox = Box<dyn PaymentStore>;
