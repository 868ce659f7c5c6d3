use super::cart::{Cart, CartRegistry};
use super::catalog::Catalog;
use super::checkout::Checkout;
use crate::config::CartScope;
use crate::domain::cart::CartLine;
use crate::domain::payment::{Payment, PaymentRequest};
use crate::domain::ports::{CartStoreBox, PaymentStoreBox, ProductStore, ProductStoreBox};
use crate::domain::product::{NewProduct, Product};
use crate::error::Result;
use rust_decimal::Decimal;
use std::future::Future;
use std::sync::Arc;

/// The entry point for the shop backend.
///
/// `Shop` owns the storage backends and exposes every operation the routing
/// layer can call. Cart-scoped operations take the caller's session, which is
/// ignored in `Shared` cart scope.
pub struct Shop {
    catalog: Catalog,
    carts: CartRegistry,
    checkout: Checkout,
}

impl Shop {
    /// Creates a new `Shop` instance.
    ///
    /// # Arguments
    ///
    /// * `products` - The product catalog store.
    /// * `cart_items` - The store for cart line items.
    /// * `payments` - The store for payment history.
    /// * `scope` - Whether all requests share one cart or each session has its own.
    pub fn new(
        products: ProductStoreBox,
        cart_items: CartStoreBox,
        payments: PaymentStoreBox,
        scope: CartScope,
    ) -> Self {
        let products: Arc<dyn ProductStore> = Arc::from(products);
        Self {
            catalog: Catalog::new(Arc::clone(&products)),
            carts: CartRegistry::new(scope, Arc::from(cart_items), products),
            checkout: Checkout::new(Arc::from(payments)),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart_scope(&self) -> CartScope {
        self.carts.scope()
    }

    pub async fn list_products(&self, min_price: Option<Decimal>) -> Result<Vec<Product>> {
        self.catalog.list(min_price).await
    }

    pub async fn get_product(&self, id: u32) -> Result<Product> {
        self.catalog.get(id).await
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product> {
        self.catalog.create(product).await
    }

    pub async fn update_product(&self, id: u32, product: NewProduct) -> Result<Product> {
        self.catalog.update(id, product).await
    }

    pub async fn delete_product(&self, id: u32) -> Result<Product> {
        self.catalog.delete(id).await
    }

    /// Runs `op` on the caller's cart, then hands the cart back to the
    /// registry.
    async fn with_cart<T, F, Fut>(&self, session: Option<&str>, op: F) -> Result<T>
    where
        F: FnOnce(Arc<Cart>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let cart = self.carts.cart(session).await?;
        let result = op(Arc::clone(&cart)).await;
        self.carts.release(cart).await;
        result
    }

    pub async fn list_cart(&self, session: Option<&str>) -> Result<Vec<CartLine>> {
        self.with_cart(session, |cart| async move { cart.list_items().await })
            .await
    }

    pub async fn add_to_cart(
        &self,
        session: Option<&str>,
        product_id: u32,
        quantity: i64,
    ) -> Result<CartLine> {
        self.with_cart(session, |cart| async move {
            cart.add_item(product_id, quantity).await
        })
        .await
    }

    pub async fn clear_cart(&self, session: Option<&str>) -> Result<()> {
        self.with_cart(session, |cart| async move { cart.clear_all().await })
            .await
    }

    pub async fn list_payments(&self) -> Result<Vec<Payment>> {
        self.checkout.history().await
    }

    /// Validates the payment, records it and clears the caller's cart.
    pub async fn create_payment(
        &self,
        session: Option<&str>,
        request: PaymentRequest,
    ) -> Result<Payment> {
        self.with_cart(session, |cart| async move {
            self.checkout.checkout(&cart, request).await
        })
        .await
    }
}
