//! Seed errors

use acme_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::runner::Phase;

/// Seed errors
///
/// Any of these aborts the run; nothing is retried.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Required configuration missing or malformed
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Could not open the database connection
    #[error("failed to connect to database: {0}")]
    Connect(#[source] DbError),

    /// A statement failed during one of the seeding phases
    #[error("{phase} phase failed: {source}")]
    Phase {
        /// Phase that was running
        phase: Phase,
        /// Failing statement's error
        #[source]
        source: DbError,
    },

    /// bcrypt rejected the input or the hashing task died
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<bcrypt::BcryptError> for SeedError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::PasswordHash(err.to_string())
    }
}

impl From<tokio::task::JoinError> for SeedError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::PasswordHash(err.to_string())
    }
}

impl SeedError {
    /// Phase that failed, if the error came from a seeding phase
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::Phase { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
