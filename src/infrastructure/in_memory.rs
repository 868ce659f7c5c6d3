use crate::domain::cart::{CartId, CartItem, Quantity};
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::ports::{CartStore, PaymentStore, ProductStore};
use crate::domain::product::{NewProduct, Product};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Ids start at 1, like an autoincrement primary key.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<u32, T>,
    next_id: u32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// A thread-safe in-memory product catalog.
///
/// Uses `Arc<RwLock<..>>` so clones share the same rows.
#[derive(Default, Clone)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Table<Product>>>,
}

impl InMemoryProductStore {
    /// Creates a new, empty in-memory product store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: NewProduct) -> Result<Product> {
        let mut products = self.products.write().await;
        let product = product.with_id(products.allocate_id());
        products.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get(&self, id: u32) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.rows.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.rows.values().cloned().collect())
    }

    async fn update(&self, product: Product) -> Result<bool> {
        let mut products = self.products.write().await;
        match products.rows.get_mut(&product.id) {
            Some(existing) => {
                *existing = product;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: u32) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.rows.remove(&id))
    }
}

#[derive(Debug)]
struct CartTable {
    by_cart: HashMap<CartId, BTreeMap<u32, CartItem>>,
    next_id: u32,
}

impl Default for CartTable {
    fn default() -> Self {
        Self {
            by_cart: HashMap::new(),
            next_id: 1,
        }
    }
}

/// A thread-safe in-memory store of cart line items, partitioned by cart.
///
/// Item ids are unique across all carts.
#[derive(Default, Clone)]
pub struct InMemoryCartStore {
    carts: Arc<RwLock<CartTable>>,
}

impl InMemoryCartStore {
    /// Creates a new, empty in-memory cart store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn add(&self, cart: &CartId, product_id: u32, quantity: Quantity) -> Result<CartItem> {
        let mut carts = self.carts.write().await;
        let id = carts.next_id;
        carts.next_id += 1;
        let item = CartItem {
            id,
            product_id,
            quantity,
        };
        carts
            .by_cart
            .entry(cart.clone())
            .or_default()
            .insert(item.id, item.clone());
        Ok(item)
    }

    async fn items(&self, cart: &CartId) -> Result<Vec<CartItem>> {
        let carts = self.carts.read().await;
        Ok(carts
            .by_cart
            .get(cart)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn clear(&self, cart: &CartId) -> Result<()> {
        self.carts.write().await.by_cart.remove(cart);
        Ok(())
    }
}

/// A thread-safe in-memory payment history.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<Table<Payment>>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, payment: NewPayment) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        let payment = payment.with_id(payments.allocate_id());
        payments.rows.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn all(&self) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.rows.values().cloned().collect())
    }

    async fn remove(&self, id: u32) -> Result<()> {
        self.payments.write().await.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{Amount, PaymentStatus};
    use rust_decimal_macros::dec;

    fn laptop() -> NewProduct {
        NewProduct::new("Laptop", "Fast", dec!(3999.99), "https://img/laptop").unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_product_store() {
        let store = InMemoryProductStore::new();
        let first = store.insert(laptop()).await.unwrap();
        let second = store.insert(laptop()).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let retrieved = store.get(1).await.unwrap().unwrap();
        assert_eq!(retrieved, first);
        assert!(store.get(3).await.unwrap().is_none());
        assert_eq!(store.all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_in_memory_product_update() {
        let store = InMemoryProductStore::new();
        let mut product = store.insert(laptop()).await.unwrap();
        product.name = "Gaming laptop".to_string();

        assert!(store.update(product.clone()).await.unwrap());
        assert_eq!(store.get(product.id).await.unwrap().unwrap().name, "Gaming laptop");

        product.id = 42;
        assert!(!store.update(product).await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_product_remove() {
        let store = InMemoryProductStore::new();
        let product = store.insert(laptop()).await.unwrap();

        assert_eq!(store.remove(product.id).await.unwrap(), Some(product.clone()));
        assert!(store.remove(product.id).await.unwrap().is_none());
        assert!(store.all().await.unwrap().is_empty());

        // Ids are not reused after a delete.
        assert_eq!(store.insert(laptop()).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_in_memory_cart_store_partitions_carts() {
        let store = InMemoryCartStore::new();
        let alice = CartId::session("alice").unwrap();
        let bob = CartId::session("bob").unwrap();

        let a = store.add(&alice, 1, Quantity::new(2).unwrap()).await.unwrap();
        let b = store.add(&bob, 1, Quantity::new(1).unwrap()).await.unwrap();
        assert_ne!(a.id, b.id);

        store.clear(&alice).await.unwrap();
        assert!(store.items(&alice).await.unwrap().is_empty());
        assert_eq!(store.items(&bob).await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn test_in_memory_cart_clear_is_idempotent() {
        let store = InMemoryCartStore::new();
        let cart = CartId::shared();
        store.add(&cart, 1, Quantity::new(1).unwrap()).await.unwrap();

        store.clear(&cart).await.unwrap();
        store.clear(&cart).await.unwrap();
        assert!(store.items(&cart).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_payment_store() {
        let store = InMemoryPaymentStore::new();
        let payment = NewPayment {
            amount: Amount::new(dec!(10)).unwrap(),
            card_number: "4242424242424242".into(),
            card_holder: "Test User".into(),
            expiry_date: "12/25".into(),
            cvv: "123".into(),
            status: PaymentStatus::Completed,
        };

        let stored = store.insert(payment).await.unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(store.all().await.unwrap(), vec![stored]);

        store.remove(1).await.unwrap();
        assert!(store.all().await.unwrap().is_empty());
    }
}
