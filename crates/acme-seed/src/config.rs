//! Configuration for the seed runner.

use acme_db::{PoolOptions, SslMode};

/// Lowest cost bcrypt accepts
const MIN_BCRYPT_COST: u32 = 4;
/// Highest cost bcrypt accepts
const MAX_BCRYPT_COST: u32 = 31;
/// Work factor used when `SEED_BCRYPT_COST` is unset
const DEFAULT_BCRYPT_COST: u32 = 10;

/// Seed runner configuration
#[derive(Clone)]
pub struct SeedConfig {
    /// Connection string; required
    pub postgres_url: String,
    /// TLS mode for the connection (default `require`)
    pub ssl_mode: SslMode,
    /// bcrypt work factor for sample passwords
    pub bcrypt_cost: u32,
    /// Pool size, which bounds how many inserts run at once
    pub max_connections: u32,
}

impl SeedConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let postgres_url = lookup("POSTGRES_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("POSTGRES_URL"))?;

        let ssl_mode = lookup("POSTGRES_SSL_MODE")
            .unwrap_or_else(|| "require".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("POSTGRES_SSL_MODE"))?;

        let bcrypt_cost: u32 = lookup("SEED_BCRYPT_COST")
            .unwrap_or_else(|| DEFAULT_BCRYPT_COST.to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("SEED_BCRYPT_COST"))?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid("SEED_BCRYPT_COST"));
        }

        let max_connections: u32 = lookup("SEED_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("SEED_MAX_CONNECTIONS"))?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid("SEED_MAX_CONNECTIONS"));
        }

        Ok(Self {
            postgres_url,
            ssl_mode,
            bcrypt_cost,
            max_connections,
        })
    }

    /// Pool options derived from this config
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions::default()
            .with_max_connections(self.max_connections)
            .with_ssl_mode(self.ssl_mode)
    }
}

// The URL usually embeds credentials.
impl std::fmt::Debug for SeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedConfig")
            .field("postgres_url", &"[REDACTED]")
            .field("ssl_mode", &self.ssl_mode)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
