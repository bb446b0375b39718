//! Acme DB Seed
//!
//! One-shot reset of the dashboard database: drops `invoices`, `customers`,
//! `users` and `revenue`, recreates them and inserts the placeholder data.
//!
//! ## Environment
//!
//! - `POSTGRES_URL` - connection string (required)
//! - `POSTGRES_SSL_MODE` - TLS mode (default `require`)
//! - `SEED_BCRYPT_COST` - bcrypt work factor (default 10)
//! - `SEED_MAX_CONNECTIONS` - pool size (default 10)
//!
//! ## Exit codes
//!
//! - `0` - every table was rebuilt and seeded
//! - `1` - `POSTGRES_URL` missing, connection failure, or any failed statement

use std::process::ExitCode;

use acme_seed::{connect_postgres, SampleData};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Acme DB seed");

    let data = SampleData::placeholder();
    let outcome = acme_seed::run(
        |key| std::env::var(key).ok(),
        |config| async move { connect_postgres(&config).await },
        &data,
    )
    .await;

    ExitCode::from(outcome.exit_code())
}
