use crate::domain::cart::{CartId, CartItem, Quantity};
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::ports::{CartStore, PaymentStore, ProductStore};
use crate::domain::product::{NewProduct, Product};
use crate::error::{Result, ShopError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options, WriteBatch};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Column Family for the product catalog.
pub const CF_PRODUCTS: &str = "products";
/// Column Family for cart line items, keyed by cart then item id.
pub const CF_CART_ITEMS: &str = "cart_items";
/// Column Family for the payment history.
pub const CF_PAYMENTS: &str = "payments";
/// Column Family holding the last id handed out per table.
pub const CF_SEQUENCES: &str = "sequences";

/// A persistent store implementation using RocksDB.
///
/// Products, cart items and payments live in separate Column Families.
/// `Clone` shares the underlying `Arc<DB>`, so one opened database can back
/// all three ports.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    sequence_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating
    /// any missing column family.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = [CF_PRODUCTS, CF_CART_ITEMS, CF_PAYMENTS, CF_SEQUENCES]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()));

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            sequence_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &'static str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            ShopError::persistence(format!("column family {name} not found"))
        })
    }

    /// Increments and returns the sequence for `table`. Ids start at 1.
    fn next_id(&self, table: &'static str) -> Result<u32> {
        let _guard = self
            .sequence_lock
            .lock()
            .map_err(|_| ShopError::persistence("sequence lock poisoned"))?;
        let cf = self.cf(CF_SEQUENCES)?;
        let current = match self.db.get_cf(cf, table)? {
            Some(bytes) => decode_id(&bytes)?,
            None => 0,
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| ShopError::persistence(format!("{table} id space exhausted")))?;
        self.db.put_cf(cf, table, next.to_be_bytes())?;
        Ok(next)
    }

    fn put_row<T: Serialize>(&self, cf: &'static str, key: &[u8], value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value).map_err(ShopError::persistence)?;
        self.db.put_cf(self.cf(cf)?, key, bytes)?;
        Ok(())
    }

    fn get_row<T: DeserializeOwned>(&self, cf: &'static str, key: &[u8]) -> Result<Option<T>> {
        match self.db.get_cf(self.cf(cf)?, key)? {
            Some(bytes) => Ok(Some(
                serde_json::from_slice(&bytes).map_err(ShopError::persistence)?,
            )),
            None => Ok(None),
        }
    }

    /// Returns every `(key, value)` whose key starts with `prefix`, in key
    /// order.
    fn scan_rows<T: DeserializeOwned>(&self, cf: &'static str, prefix: &[u8]) -> Result<Vec<(Box<[u8]>, T)>> {
        let iter = self
            .db
            .iterator_cf(self.cf(cf)?, IteratorMode::From(prefix, Direction::Forward));

        let mut rows = Vec::new();
        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(prefix) {
                break;
            }
            let row = serde_json::from_slice(&value).map_err(ShopError::persistence)?;
            rows.push((key, row));
        }
        Ok(rows)
    }
}

fn decode_id(bytes: &[u8]) -> Result<u32> {
    let bytes: [u8; 4] = bytes
        .try_into()
        .map_err(|_| ShopError::persistence("corrupt sequence value"))?;
    Ok(u32::from_be_bytes(bytes))
}

/// Length-prefixed so that no cart's key range contains another's.
fn cart_prefix(cart: &CartId) -> Result<Vec<u8>> {
    let name = cart.as_str().as_bytes();
    let len = u16::try_from(name.len())
        .map_err(|_| ShopError::persistence(format!("cart id {cart} too long for a key")))?;
    let mut prefix = Vec::with_capacity(2 + name.len() + 4);
    prefix.extend_from_slice(&len.to_be_bytes());
    prefix.extend_from_slice(name);
    Ok(prefix)
}

fn cart_item_key(cart: &CartId, item_id: u32) -> Result<Vec<u8>> {
    let mut key = cart_prefix(cart)?;
    key.extend_from_slice(&item_id.to_be_bytes());
    Ok(key)
}

#[async_trait]
impl ProductStore for RocksDBStore {
    async fn insert(&self, product: NewProduct) -> Result<Product> {
        let product = product.with_id(self.next_id(CF_PRODUCTS)?);
        self.put_row(CF_PRODUCTS, &product.id.to_be_bytes(), &product)?;
        Ok(product)
    }

    async fn get(&self, id: u32) -> Result<Option<Product>> {
        self.get_row(CF_PRODUCTS, &id.to_be_bytes())
    }

    async fn all(&self) -> Result<Vec<Product>> {
        Ok(self
            .scan_rows::<Product>(CF_PRODUCTS, &[])?
            .into_iter()
            .map(|(_, product)| product)
            .collect())
    }

    async fn update(&self, product: Product) -> Result<bool> {
        let key = product.id.to_be_bytes();
        if self.db.get_pinned_cf(self.cf(CF_PRODUCTS)?, key)?.is_none() {
            return Ok(false);
        }
        self.put_row(CF_PRODUCTS, &key, &product)?;
        Ok(true)
    }

    async fn remove(&self, id: u32) -> Result<Option<Product>> {
        let key = id.to_be_bytes();
        let product = self.get_row::<Product>(CF_PRODUCTS, &key)?;
        if product.is_some() {
            self.db.delete_cf(self.cf(CF_PRODUCTS)?, key)?;
        }
        Ok(product)
    }
}

#[async_trait]
impl CartStore for RocksDBStore {
    async fn add(&self, cart: &CartId, product_id: u32, quantity: Quantity) -> Result<CartItem> {
        let item = CartItem {
            id: self.next_id(CF_CART_ITEMS)?,
            product_id,
            quantity,
        };
        self.put_row(CF_CART_ITEMS, &cart_item_key(cart, item.id)?, &item)?;
        Ok(item)
    }

    async fn items(&self, cart: &CartId) -> Result<Vec<CartItem>> {
        Ok(self
            .scan_rows::<CartItem>(CF_CART_ITEMS, &cart_prefix(cart)?)?
            .into_iter()
            .map(|(_, item)| item)
            .collect())
    }

    async fn clear(&self, cart: &CartId) -> Result<()> {
        let cf = self.cf(CF_CART_ITEMS)?;
        let mut batch = WriteBatch::default();
        for (key, _) in self.scan_rows::<CartItem>(CF_CART_ITEMS, &cart_prefix(cart)?)? {
            batch.delete_cf(cf, key);
        }
        self.db.write(batch)?;
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn insert(&self, payment: NewPayment) -> Result<Payment> {
        let payment = payment.with_id(self.next_id(CF_PAYMENTS)?);
        self.put_row(CF_PAYMENTS, &payment.id.to_be_bytes(), &payment)?;
        Ok(payment)
    }

    async fn all(&self) -> Result<Vec<Payment>> {
        Ok(self
            .scan_rows::<Payment>(CF_PAYMENTS, &[])?
            .into_iter()
            .map(|(_, payment)| payment)
            .collect())
    }

    async fn remove(&self, id: u32) -> Result<()> {
        self.db.delete_cf(self.cf(CF_PAYMENTS)?, id.to_be_bytes())?;
        Ok(())
    }
}
