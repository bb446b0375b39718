//! Acme Seed - Database reset and sample data
//!
//! Drops the four dashboard tables, recreates them and inserts the fixed
//! placeholder datasets. The reset is destructive: this is a full rebuild,
//! not a sync, and rows that already exist are skipped rather than updated.
//!
//! # Example
//!
//! ```rust,ignore
//! use acme_seed::{connect_postgres, run, SampleData};
//!
//! let data = SampleData::placeholder();
//! let outcome = run(
//!     |key| std::env::var(key).ok(),
//!     |config| async move { connect_postgres(&config).await },
//!     &data,
//! )
//! .await;
//!
//! std::process::exit(outcome.exit_code().into());
//! ```

pub mod config;
pub mod error;
pub mod password;
pub mod placeholder;
pub mod runner;

pub use config::{ConfigError, SeedConfig};
pub use error::SeedError;
pub use placeholder::SampleData;
pub use runner::{connect_postgres, run, seed, Phase, SeedOutcome, SeedReport, TableCounts};
