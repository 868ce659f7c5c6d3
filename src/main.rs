use clap::Parser;
use miette::{IntoDiagnostic, Result};
use shopcart::application::shop::Shop;
use shopcart::config::{Config, LogFormat};
use shopcart::domain::ports::{CartStoreBox, PaymentStoreBox, ProductStoreBox};
use shopcart::infrastructure::in_memory::{
    InMemoryCartStore, InMemoryPaymentStore, InMemoryProductStore,
};
use shopcart::interfaces::csv::product_reader::ProductReader;
use shopcart::interfaces::jsonl::request_reader::RequestReader;
use shopcart::interfaces::jsonl::response_writer::ResponseWriter;
use shopcart::interfaces::jsonl::serve;
use shopcart::seed::{load_catalog, seed_demo_catalog};
use std::fs::File;
use std::io::{self, BufReader};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shopcart=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn build_shop(config: &Config) -> Result<Shop> {
    #[cfg(feature = "storage-rocksdb")]
    {
        if let Some(db_path) = &config.db_path {
            use shopcart::infrastructure::rocksdb::RocksDBStore;

            let store = RocksDBStore::open(db_path).into_diagnostic()?;
            tracing::info!(path = %db_path.display(), "using RocksDB storage");

            let products: ProductStoreBox = Box::new(store.clone());
            let cart_items: CartStoreBox = Box::new(store.clone());
            let payments: PaymentStoreBox = Box::new(store);
            return Ok(Shop::new(products, cart_items, payments, config.cart_scope));
        }
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    {
        if config.db_path.is_some() {
            tracing::warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
            );
        }
    }

    let products: ProductStoreBox = Box::new(InMemoryProductStore::new());
    let cart_items: CartStoreBox = Box::new(InMemoryCartStore::new());
    let payments: PaymentStoreBox = Box::new(InMemoryPaymentStore::new());
    Ok(Shop::new(products, cart_items, payments, config.cart_scope))
}

async fn populate_catalog(shop: &Shop, config: &Config) -> Result<()> {
    let catalog = shop.catalog();
    if !catalog.is_empty().await.into_diagnostic()? {
        tracing::info!("catalog already populated, skipping seed");
        return Ok(());
    }
    match &config.catalog {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            load_catalog(catalog, ProductReader::new(file).products())
                .await
                .into_diagnostic()?;
        }
        None => {
            seed_demo_catalog(catalog).await.into_diagnostic()?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.log_format);

    let shop = build_shop(&config)?;
    populate_catalog(&shop, &config).await?;

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());
    let handled = match &config.requests {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            serve(&shop, RequestReader::new(BufReader::new(file)), &mut writer).await
        }
        None => serve(&shop, RequestReader::new(io::stdin().lock()), &mut writer).await,
    }
    .into_diagnostic()?;

    tracing::info!(handled, "all requests processed");
    Ok(())
}
