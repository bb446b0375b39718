//! Configuration for the Dashboard API service.

use std::time::Duration;

use acme_db::{PoolOptions, SslMode};

/// Dashboard API configuration
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database URL
    pub database_url: String,
    /// Database TLS mode
    pub ssl_mode: SslMode,
    /// Request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
    /// How many invoices the listing shows
    pub invoice_list_limit: i64,
    /// Upper bound on how long a listing stays cached without a revalidation
    pub listing_cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        // Database
        let database_url = lookup("POSTGRES_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("POSTGRES_URL"))?;

        let ssl_mode = lookup("POSTGRES_SSL_MODE")
            .unwrap_or_else(|| "require".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("POSTGRES_SSL_MODE"))?;

        // Server
        let http_port = lookup("HTTP_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        let request_timeout_secs: u64 = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        // Metrics
        let metrics_enabled = lookup("METRICS_ENABLED")
            .unwrap_or_else(|| "true".to_string())
            .parse()
            .unwrap_or(true);

        // Listing
        let invoice_list_limit: i64 = lookup("INVOICE_LIST_LIMIT")
            .unwrap_or_else(|| "50".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("INVOICE_LIST_LIMIT"))?;
        if invoice_list_limit <= 0 {
            return Err(ConfigError::Invalid("INVOICE_LIST_LIMIT"));
        }

        let listing_cache_ttl_secs: u64 = lookup("LISTING_CACHE_TTL_SECS")
            .unwrap_or_else(|| "300".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("LISTING_CACHE_TTL_SECS"))?;

        Ok(Self {
            http_port,
            database_url,
            ssl_mode,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
            invoice_list_limit,
            listing_cache_ttl: Duration::from_secs(listing_cache_ttl_secs),
        })
    }

    /// Pool options derived from this config
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions::default().with_ssl_mode(self.ssl_mode)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("http_port", &self.http_port)
            .field("database_url", &"[REDACTED]")
            .field("ssl_mode", &self.ssl_mode)
            .field("request_timeout", &self.request_timeout)
            .field("metrics_enabled", &self.metrics_enabled)
            .field("invoice_list_limit", &self.invoice_list_limit)
            .field("listing_cache_ttl", &self.listing_cache_ttl)
            .finish()
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
