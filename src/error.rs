//! Error taxonomy for the catalog service
//!
//! Startup errors (configuration, unreachable store) are fatal; everything
//! else surfaces per-request and is formatted by the GraphQL layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("malformed row: {0}")]
    MalformedRow(String),
}
