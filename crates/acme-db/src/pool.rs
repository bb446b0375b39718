//! Database connection pool
//!
//! The pool is the explicit storage handle: whoever creates it owns it and
//! is responsible for calling [`close_pool`] when done.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::error::DbResult;

pub use sqlx::postgres::PgSslMode as SslMode;

/// Database connection pool type alias
pub type DbPool = PgPool;

/// Pool tuning options
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Maximum number of open connections
    pub max_connections: u32,
    /// How long to wait for a free connection
    pub acquire_timeout: Duration,
    /// TLS mode; `None` keeps whatever the URL specifies
    pub ssl_mode: Option<SslMode>,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            ssl_mode: None,
        }
    }
}

impl PoolOptions {
    /// Set the maximum number of connections
    #[must_use]
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the acquire timeout
    #[must_use]
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Override the TLS mode
    #[must_use]
    pub fn with_ssl_mode(mut self, mode: SslMode) -> Self {
        self.ssl_mode = Some(mode);
        self
    }
}

/// Create a new database connection pool
pub async fn create_pool(database_url: &str) -> DbResult<DbPool> {
    create_pool_with_options(database_url, PoolOptions::default()).await
}

/// Create a new database connection pool with explicit options
pub async fn create_pool_with_options(
    database_url: &str,
    options: PoolOptions,
) -> DbResult<DbPool> {
    let mut connect = PgConnectOptions::from_str(database_url)?;
    if let Some(mode) = options.ssl_mode {
        connect = connect.ssl_mode(mode);
    }

    let pool = PgPoolOptions::new()
        .max_connections(options.max_connections)
        .acquire_timeout(options.acquire_timeout)
        .connect_with(connect)
        .await?;

    tracing::debug!(
        max_connections = options.max_connections,
        "Database pool opened"
    );

    Ok(pool)
}

/// Close the pool, waiting for checked-out connections to be returned
pub async fn close_pool(pool: &DbPool) {
    pool.close().await;
    tracing::debug!("Database pool closed");
}
