//! Seed runner
//!
//! Phases run strictly in sequence:
//!
//! 1. drop `invoices`, `customers`, `users`, `revenue`
//! 2. users, customers, invoices, revenue: create the table, then insert
//!    every sample row concurrently and wait for the whole batch
//!
//! The first failing statement aborts its batch (in-flight inserts of that
//! batch are dropped) and the run. There are no retries and no transaction
//! spanning phases.

use std::future::Future;

use acme_db::pg::PgSeedRepository;
use acme_db::{DbResult, Repositories, SeedRepository, Table};
use futures::future::try_join_all;
use tracing::instrument;

use crate::config::SeedConfig;
use crate::password::hash_users;
use crate::placeholder::SampleData;
use crate::SeedError;

/// Seeding phase, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    DropTables,
    Users,
    Customers,
    Invoices,
    Revenue,
}

impl Phase {
    fn for_table(table: Table) -> Self {
        match table {
            Table::Users => Self::Users,
            Table::Customers => Self::Customers,
            Table::Invoices => Self::Invoices,
            Table::Revenue => Self::Revenue,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DropTables => write!(f, "drop tables"),
            Self::Users => write!(f, "users"),
            Self::Customers => write!(f, "customers"),
            Self::Invoices => write!(f, "invoices"),
            Self::Revenue => write!(f, "revenue"),
        }
    }
}

/// Rows written vs. skipped on conflict for one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub inserted: u64,
    pub skipped: u64,
}

/// Per-table outcome of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: TableCounts,
    pub customers: TableCounts,
    pub invoices: TableCounts,
    pub revenue: TableCounts,
}

impl SeedReport {
    /// Rows inserted across all tables
    pub fn total_inserted(&self) -> u64 {
        self.users.inserted + self.customers.inserted + self.invoices.inserted + self.revenue.inserted
    }
}

/// Process-level result of [`run`]
#[derive(Debug)]
pub enum SeedOutcome {
    Seeded(SeedReport),
    Failed(SeedError),
}

impl SeedOutcome {
    /// `0` on success, `1` on any failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Seeded(_) => 0,
            Self::Failed(_) => 1,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }
}

/// Open a Postgres-backed seed repository from config
pub async fn connect_postgres(config: &SeedConfig) -> DbResult<PgSeedRepository> {
    let pool = acme_db::create_pool_with_options(&config.postgres_url, config.pool_options()).await?;
    Ok(Repositories::new(pool).seed)
}

/// Load config, connect, seed and always close the connection.
///
/// Configuration is validated before `connect` is called, so a missing
/// `POSTGRES_URL` issues no SQL at all.
pub async fn run<L, C, Fut, S>(lookup: L, connect: C, data: &SampleData) -> SeedOutcome
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(SeedConfig) -> Fut,
    Fut: Future<Output = DbResult<S>>,
    S: SeedRepository,
{
    tracing::info!("Starting full database reset");

    match try_run(lookup, connect, data).await {
        Ok(report) => {
            tracing::info!(
                users = report.users.inserted,
                customers = report.customers.inserted,
                invoices = report.invoices.inserted,
                revenue = report.revenue.inserted,
                "Database reseeded"
            );
            SeedOutcome::Seeded(report)
        }
        Err(e) => {
            tracing::error!(error = %e, phase = ?e.phase(), "Database reseed failed");
            SeedOutcome::Failed(e)
        }
    }
}

async fn try_run<L, C, Fut, S>(lookup: L, connect: C, data: &SampleData) -> Result<SeedReport, SeedError>
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(SeedConfig) -> Fut,
    Fut: Future<Output = DbResult<S>>,
    S: SeedRepository,
{
    let config = SeedConfig::from_lookup(lookup)?;
    tracing::debug!(config = ?config, "Configuration loaded");

    let bcrypt_cost = config.bcrypt_cost;
    let store = connect(config).await.map_err(SeedError::Connect)?;

    let result = seed(&store, data, bcrypt_cost).await;
    store.close().await;
    result
}

/// Drop, recreate and fill all four tables.
///
/// Does not close `store`; the caller owns it.
#[instrument(skip_all, fields(rows = data.row_count()))]
pub async fn seed<S>(store: &S, data: &SampleData, bcrypt_cost: u32) -> Result<SeedReport, SeedError>
where
    S: SeedRepository + ?Sized,
{
    drop_tables(store).await?;

    let users = {
        create_table(store, Table::Users).await?;
        let hashed = hash_users(&data.users, bcrypt_cost).await?;
        fan_out(Table::Users, &hashed, |user| store.insert_user(user)).await?
    };

    create_table(store, Table::Customers).await?;
    let customers = fan_out(Table::Customers, &data.customers, |customer| {
        store.insert_customer(customer)
    })
    .await?;

    create_table(store, Table::Invoices).await?;
    let invoices = fan_out(Table::Invoices, &data.invoices, |invoice| {
        store.insert_invoice(invoice)
    })
    .await?;

    create_table(store, Table::Revenue).await?;
    let revenue = fan_out(Table::Revenue, &data.revenue, |revenue| {
        store.insert_revenue(revenue)
    })
    .await?;

    Ok(SeedReport {
        users,
        customers,
        invoices,
        revenue,
    })
}

async fn drop_tables<S>(store: &S) -> Result<(), SeedError>
where
    S: SeedRepository + ?Sized,
{
    tracing::info!("Dropping existing tables");
    for table in Table::DROP_ORDER {
        store
            .drop_table(table)
            .await
            .map_err(|source| SeedError::Phase {
                phase: Phase::DropTables,
                source,
            })?;
        tracing::debug!(table = %table, "Table dropped");
    }
    Ok(())
}

async fn create_table<S>(store: &S, table: Table) -> Result<(), SeedError>
where
    S: SeedRepository + ?Sized,
{
    tracing::info!(table = %table, "Creating table");
    store
        .create_table(table)
        .await
        .map_err(|source| SeedError::Phase {
            phase: Phase::for_table(table),
            source,
        })
}

/// Run one insert per row concurrently and wait for all of them.
async fn fan_out<'a, T, F, Fut>(table: Table, rows: &'a [T], insert: F) -> Result<TableCounts, SeedError>
where
    F: FnMut(&'a T) -> Fut,
    Fut: Future<Output = DbResult<u64>>,
{
    let written = try_join_all(rows.iter().map(insert))
        .await
        .map_err(|source| SeedError::Phase {
            phase: Phase::for_table(table),
            source,
        })?;

    let inserted: u64 = written.iter().sum();
    let counts = TableCounts {
        inserted,
        skipped: rows.len() as u64 - inserted,
    };

    tracing::info!(
        table = %table,
        inserted = counts.inserted,
        skipped = counts.skipped,
        "Rows inserted"
    );

    Ok(counts)
}
