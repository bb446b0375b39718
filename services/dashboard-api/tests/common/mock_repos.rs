//! In-memory invoice repository for testing
//!
//! Counts every write and every listing query so tests can assert when the
//! database was (or was not) touched.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use acme_db::{CreateInvoice, DbError, DbResult, InvoiceListRow, InvoiceRepository};
use acme_types::InvoiceId;
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    invoices: DashMap<Uuid, CreateInvoice>,
    writes: AtomicUsize,
    listing_queries: AtomicUsize,
    fail_writes: AtomicBool,
    fail_ping: AtomicBool,
}

/// Cloning shares the same underlying state
#[derive(Default, Clone)]
pub struct MockInvoiceRepository {
    inner: Arc<Inner>,
}

fn unavailable() -> DbError {
    DbError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[allow(dead_code)]
impl MockInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self) {
        self.inner.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_ping(&self) {
        self.inner.fail_ping.store(true, Ordering::SeqCst);
    }

    /// Write attempts, including failed ones
    pub fn writes(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    pub fn listing_queries(&self) -> usize {
        self.inner.listing_queries.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<CreateInvoice> {
        self.inner
            .invoices
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl InvoiceRepository for MockInvoiceRepository {
    async fn create(&self, invoice: CreateInvoice) -> DbResult<InvoiceId> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        let id = Uuid::new_v4();
        self.inner.invoices.insert(id, invoice);
        Ok(InvoiceId(id))
    }

    async fn find_latest(&self, limit: i64) -> DbResult<Vec<InvoiceListRow>> {
        self.inner.listing_queries.fetch_add(1, Ordering::SeqCst);

        let mut rows: Vec<InvoiceListRow> = self
            .inner
            .invoices
            .iter()
            .map(|entry| {
                let invoice = entry.value();
                InvoiceListRow {
                    id: *entry.key(),
                    customer_id: Uuid::parse_str(&invoice.customer_id).unwrap_or_default(),
                    name: "Evil Rabbit".to_string(),
                    email: "evil@rabbit.com".to_string(),
                    image_url: "/customers/evil-rabbit.png".to_string(),
                    amount: invoice.amount,
                    status: invoice.status.to_string(),
                    date: invoice.date,
                }
            })
            .collect();

        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn ping(&self) -> DbResult<()> {
        if self.inner.fail_ping.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}
