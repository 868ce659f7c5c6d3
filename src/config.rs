//! Runtime configuration, from command-line flags with environment fallbacks.
//!
//! # Environment Variables
//!
//! - `SHOPCART_DB_PATH` - RocksDB directory (needs the `storage-rocksdb` feature)
//! - `SHOPCART_CATALOG` - CSV product catalog loaded at start-up
//! - `SHOPCART_CART_SCOPE` - `shared` (default) or `session`
//! - `SHOPCART_LOG_FORMAT` - `text` (default) or `json`
//! - `RUST_LOG` - tracing filter (default: `shopcart=info`)

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How carts are partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CartScope {
    /// One cart for the whole process. Checkout clears it for everyone.
    #[default]
    Shared,
    /// One cart per `session` value carried in cart and payment requests.
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// JSON-lines request file. Reads stdin when omitted.
    pub requests: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "SHOPCART_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// CSV catalog (`name,description,price,image_url`) to load instead of
    /// the built-in demo products.
    #[arg(long, env = "SHOPCART_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t, env = "SHOPCART_CART_SCOPE")]
    pub cart_scope: CartScope,

    #[arg(long, value_enum, default_value_t, env = "SHOPCART_LOG_FORMAT")]
    pub log_format: LogFormat,
}
