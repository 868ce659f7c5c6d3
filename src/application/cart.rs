use crate::config::CartScope;
use crate::domain::cart::{CartId, CartLine, Quantity};
use crate::domain::ports::{CartStore, ProductStore};
use crate::error::{Entity, Result, ShopError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// A handle on one cart.
///
/// Adding items and checking out both take the cart's lock, so an item added
/// during a checkout is never wiped by that checkout's clear.
pub struct Cart {
    id: CartId,
    items: Arc<dyn CartStore>,
    products: Arc<dyn ProductStore>,
    mutex: Mutex<()>,
}

/// Exclusive access to a cart for the duration of a checkout.
pub struct CartGuard<'a> {
    cart: &'a Cart,
    _guard: MutexGuard<'a, ()>,
}

impl CartGuard<'_> {
    pub fn cart_id(&self) -> &CartId {
        &self.cart.id
    }

    /// Removes every item while the lock is held.
    pub async fn clear(&self) -> Result<()> {
        self.cart.items.clear(&self.cart.id).await
    }
}

impl Cart {
    pub fn new(id: CartId, items: Arc<dyn CartStore>, products: Arc<dyn ProductStore>) -> Self {
        Self {
            id,
            items,
            products,
            mutex: Mutex::new(()),
        }
    }

    pub fn id(&self) -> &CartId {
        &self.id
    }

    /// Adds `quantity` of an existing product.
    ///
    /// Fails with `NotFound` when the product does not exist and with a
    /// validation error when the quantity is not positive.
    pub async fn add_item(&self, product_id: u32, quantity: i64) -> Result<CartLine> {
        let quantity = Quantity::new(quantity)?;
        let _guard = self.mutex.lock().await;

        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| ShopError::not_found(Entity::Product, product_id))?;

        let item = self.items.add(&self.id, product_id, quantity).await?;
        tracing::debug!(cart = %self.id, item_id = item.id, product_id, "item added to cart");
        Ok(CartLine::join(item, product))
    }

    /// Lists the cart's items joined with the current product data.
    pub async fn list_items(&self) -> Result<Vec<CartLine>> {
        let items = self.items.items(&self.id).await?;
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            match self.products.get(item.product_id).await? {
                Some(product) => lines.push(CartLine::join(item, product)),
                None => tracing::warn!(
                    cart = %self.id,
                    item_id = item.id,
                    product_id = item.product_id,
                    "cart item references a missing product"
                ),
            }
        }
        Ok(lines)
    }

    /// Empties the cart. Clearing an empty cart succeeds.
    pub async fn clear_all(&self) -> Result<()> {
        self.lock().await.clear().await
    }

    /// Waits for exclusive access to the cart.
    pub async fn lock(&self) -> CartGuard<'_> {
        CartGuard {
            cart: self,
            _guard: self.mutex.lock().await,
        }
    }
}

/// Hands out [`Cart`] handles according to the configured [`CartScope`].
///
/// A handle stays registered only while some request holds it. Items live in
/// the [`CartStore`], so dropping an idle handle loses nothing.
pub struct CartRegistry {
    scope: CartScope,
    items: Arc<dyn CartStore>,
    products: Arc<dyn ProductStore>,
    carts: Mutex<HashMap<CartId, Arc<Cart>>>,
}

impl CartRegistry {
    pub fn new(
        scope: CartScope,
        items: Arc<dyn CartStore>,
        products: Arc<dyn ProductStore>,
    ) -> Self {
        Self {
            scope,
            items,
            products,
            carts: Mutex::new(HashMap::new()),
        }
    }

    pub fn scope(&self) -> CartScope {
        self.scope
    }

    /// Resolves the cart for a request. In `Shared` scope the session is
    /// ignored; in `Session` scope it is required.
    pub async fn cart(&self, session: Option<&str>) -> Result<Arc<Cart>> {
        let id = match self.scope {
            CartScope::Shared => CartId::shared(),
            CartScope::Session => CartId::session(session.unwrap_or_default())?,
        };

        let mut carts = self.carts.lock().await;
        let cart = carts.entry(id).or_insert_with_key(|id| {
            Arc::new(Cart::new(
                id.clone(),
                Arc::clone(&self.items),
                Arc::clone(&self.products),
            ))
        });
        Ok(Arc::clone(cart))
    }

    /// Returns a handle obtained from [`CartRegistry::cart`]. The cart is
    /// forgotten once no other request holds it.
    pub async fn release(&self, cart: Arc<Cart>) {
        let mut carts = self.carts.lock().await;
        let id = cart.id().clone();
        drop(cart);
        if carts.get(&id).is_some_and(|held| Arc::strong_count(held) == 1) {
            carts.remove(&id);
        }
    }

    /// Number of carts currently held by in-flight requests.
    pub async fn open_carts(&self) -> usize {
        self.carts.lock().await.len()
    }
}
