//! Acme DB - Database abstractions
//!
//! SQLx-based database layer shared by the seed runner and the dashboard API.
//!
//! # Example
//!
//! ```rust,ignore
//! use acme_db::{create_pool, close_pool, Repositories, Table};
//!
//! let pool = create_pool("postgres://localhost/acme").await?;
//! let repos = Repositories::new(pool.clone());
//!
//! repos.seed.create_table(Table::Revenue).await?;
//! let latest = repos.invoices.find_latest(5).await?;
//!
//! close_pool(&pool).await;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;
pub mod schema;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{close_pool, create_pool, create_pool_with_options, DbPool, PoolOptions, SslMode};
pub use repo::*;
pub use schema::Table;
