use crate::application::catalog::Catalog;
use crate::domain::product::NewProduct;
use crate::error::Result;
use rust_decimal_macros::dec;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

fn demo_products() -> Result<Vec<NewProduct>> {
    [
        ("Laptop", "High-performance laptop for developers", dec!(3999.99)),
        ("Smartphone", "Smartphone running the latest OS", dec!(1999.99)),
        ("Headphones", "Noise-cancelling headphones", dec!(399.99)),
        ("Computer mouse", "Ergonomic wireless mouse", dec!(149.99)),
    ]
    .into_iter()
    .map(|(name, description, price)| NewProduct::new(name, description, price, PLACEHOLDER_IMAGE))
    .collect()
}

/// Seeds the demo products when the catalog is empty. Returns how many
/// products were inserted.
pub async fn seed_demo_catalog(catalog: &Catalog) -> Result<usize> {
    if !catalog.is_empty().await? {
        return Ok(0);
    }
    let products = demo_products()?;
    let count = products.len();
    for product in products {
        catalog.create(product).await?;
    }
    tracing::info!(count, "seeded demo catalog");
    Ok(count)
}

/// Inserts every valid product from `products`, logging and skipping the
/// rest. Returns how many were inserted.
pub async fn load_catalog<I>(catalog: &Catalog, products: I) -> Result<usize>
where
    I: IntoIterator<Item = Result<NewProduct>>,
{
    let mut count = 0;
    for (row, product) in products.into_iter().enumerate() {
        match product {
            Ok(product) => {
                catalog.create(product).await?;
                count += 1;
            }
            Err(err) => tracing::warn!(row = row + 1, error = %err, "skipping catalog row"),
        }
    }
    tracing::info!(count, "loaded catalog");
    Ok(count)
}
