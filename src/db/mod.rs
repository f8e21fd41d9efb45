//! Database connection and operations

pub mod books;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use books::{AuthorRecord, BookFilter, BookRecord, BookRepository};

use crate::config::Config;
use crate::error::CatalogError;

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new database connection pool and verify connectivity
    pub async fn connect(config: &Config) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url())
            .await?;

        // Ping so a wrong database name or bad credentials fail at startup
        // instead of on the first request.
        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get a book repository
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.pool.clone())
    }

    /// Close the pool, waiting for checked-out connections to be returned
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
