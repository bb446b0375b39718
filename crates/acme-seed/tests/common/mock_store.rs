//! In-memory seed store for testing
//!
//! Mirrors the Postgres behaviour the runner relies on: tables must exist
//! before rows go in, drops clear everything, and inserts skip rows whose
//! key already exists. Every call counts as one statement. Inserts yield to
//! the scheduler mid-statement so concurrent batches overlap.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use acme_db::{DbError, DbResult, SeedRepository, Table};
use acme_types::{Customer, HashedUser, Revenue, SeedInvoice};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    tables: DashSet<Table>,
    users: DashMap<Uuid, HashedUser>,
    customers: DashMap<Uuid, Customer>,
    invoices: DashMap<Uuid, SeedInvoice>,
    revenue: DashMap<String, i32>,
    statements: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    timeline: Mutex<Vec<String>>,
    fail_inserts_into: Mutex<Option<Table>>,
    closed: AtomicBool,
}

/// Cloning shares the same underlying state
#[derive(Default, Clone)]
pub struct MockSeedStore {
    inner: Arc<Inner>,
}

#[allow(dead_code)]
impl MockSeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert into `table` fail
    pub fn fail_inserts_into(&self, table: Table) {
        *self.inner.fail_inserts_into.lock().unwrap() = Some(table);
    }

    /// Total statements received
    pub fn statements(&self) -> usize {
        self.inner.statements.load(Ordering::SeqCst)
    }

    /// Schema statements in the order they were issued
    pub fn log(&self) -> Vec<String> {
        self.timeline()
            .into_iter()
            .filter(|entry| !entry.starts_with("insert "))
            .collect()
    }

    /// Schema statements and completed inserts, in completion order
    pub fn timeline(&self) -> Vec<String> {
        self.inner.timeline.lock().unwrap().clone()
    }

    /// Most inserts that were in progress at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.inner.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    pub fn table_exists(&self, table: Table) -> bool {
        self.inner.tables.contains(&table)
    }

    pub fn row_count(&self, table: Table) -> usize {
        match table {
            Table::Users => self.inner.users.len(),
            Table::Customers => self.inner.customers.len(),
            Table::Invoices => self.inner.invoices.len(),
            Table::Revenue => self.inner.revenue.len(),
        }
    }

    pub fn user_password_hash(&self, email: &str) -> Option<String> {
        self.inner
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.password_hash.clone())
    }

    pub fn revenue_for(&self, month: &str) -> Option<i32> {
        self.inner.revenue.get(month).map(|r| *r.value())
    }

    fn record(&self, entry: String) {
        self.inner.statements.fetch_add(1, Ordering::SeqCst);
        self.inner.timeline.lock().unwrap().push(entry);
    }

    fn count_insert(&self, table: Table) -> DbResult<()> {
        self.inner.statements.fetch_add(1, Ordering::SeqCst);
        if *self.inner.fail_inserts_into.lock().unwrap() == Some(table) {
            return Err(DbError::Sqlx(sqlx::Error::Protocol(format!(
                "simulated insert failure on {table}"
            ))));
        }
        if !self.inner.tables.contains(&table) {
            return Err(DbError::Sqlx(sqlx::Error::Protocol(format!(
                "relation \"{table}\" does not exist"
            ))));
        }
        Ok(())
    }

    async fn insert<F>(&self, table: Table, write: F) -> DbResult<u64>
    where
        F: FnOnce() -> u64,
    {
        self.count_insert(table)?;

        let now = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;

        let written = write();
        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.inner
            .timeline
            .lock()
            .unwrap()
            .push(format!("insert {table}"));
        Ok(written)
    }
}

fn insert_or_skip<K, V>(map: &DashMap<K, V>, key: K, value: V) -> u64
where
    K: Eq + std::hash::Hash,
{
    match map.entry(key) {
        Entry::Occupied(_) => 0,
        Entry::Vacant(slot) => {
            slot.insert(value);
            1
        }
    }
}

#[async_trait]
impl SeedRepository for MockSeedStore {
    async fn drop_table(&self, table: Table) -> DbResult<()> {
        self.record(format!("drop {table}"));
        self.inner.tables.remove(&table);
        match table {
            Table::Users => self.inner.users.clear(),
            Table::Customers => self.inner.customers.clear(),
            Table::Invoices => self.inner.invoices.clear(),
            Table::Revenue => self.inner.revenue.clear(),
        }
        Ok(())
    }

    async fn create_table(&self, table: Table) -> DbResult<()> {
        self.record(format!("create {table}"));
        self.inner.tables.insert(table);
        Ok(())
    }

    async fn insert_user(&self, user: &HashedUser) -> DbResult<u64> {
        self.insert(Table::Users, || {
            insert_or_skip(&self.inner.users, user.id.0, user.clone())
        })
        .await
    }

    async fn insert_customer(&self, customer: &Customer) -> DbResult<u64> {
        self.insert(Table::Customers, || {
            insert_or_skip(&self.inner.customers, customer.id.0, customer.clone())
        })
        .await
    }

    async fn insert_invoice(&self, invoice: &SeedInvoice) -> DbResult<u64> {
        // Storage generates the key, so invoices never conflict.
        self.insert(Table::Invoices, || {
            insert_or_skip(&self.inner.invoices, Uuid::new_v4(), invoice.clone())
        })
        .await
    }

    async fn insert_revenue(&self, revenue: &Revenue) -> DbResult<u64> {
        self.insert(Table::Revenue, || {
            insert_or_skip(&self.inner.revenue, revenue.month.clone(), revenue.revenue)
        })
        .await
    }

    async fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
    }
}
