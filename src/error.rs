use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The kind of record a `NotFound` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Product,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Product => "product",
        };
        f.write_str(name)
    }
}

/// Outcome classification handed to the routing layer, which maps it to
/// transport-level codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    ClientError,
    NotFound,
    ServerError,
}

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: u32 },
    #[error("persistence error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShopError {
    pub fn validation(field: &'static str, message: &'static str) -> Self {
        Self::Validation { field, message }
    }

    pub fn not_found(entity: Entity, id: u32) -> Self {
        Self::NotFound { entity, id }
    }

    /// Wraps any storage backend failure.
    pub fn persistence<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Persistence(err.into())
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Validation { .. } => Status::ClientError,
            Self::NotFound { .. } => Status::NotFound,
            Self::Persistence(_) | Self::Csv(_) | Self::Io(_) => Status::ServerError,
        }
    }

    /// The message safe to show a client. Server-side failures never leak
    /// their internal detail.
    pub fn public_message(&self) -> String {
        match self.status() {
            Status::ServerError => "internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for ShopError {
    fn from(err: rocksdb::Error) -> Self {
        Self::persistence(err)
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
