//! Repository traits
//!
//! Define async repository interfaces for database operations.

use acme_types::{Customer, HashedUser, InvoiceId, InvoiceStatus, Revenue, SeedInvoice};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::DbResult;
use crate::models::InvoiceListRow;
use crate::schema::Table;

/// Invoice repository trait
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert one invoice; storage generates the ID
    async fn create(&self, invoice: CreateInvoice) -> DbResult<InvoiceId>;

    /// Newest invoices first, joined with their customer
    async fn find_latest(&self, limit: i64) -> DbResult<Vec<InvoiceListRow>>;

    /// Check the backing store is reachable
    async fn ping(&self) -> DbResult<()>;
}

/// Create invoice input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvoice {
    /// Customer reference as submitted; storage casts it to `UUID`
    pub customer_id: String,
    /// Amount in minor units
    pub amount: i32,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Destructive schema reset and sample-data inserts
///
/// Every insert is conflict-ignoring and returns the number of rows written:
/// `1` when inserted, `0` when a row with the same key already existed.
#[async_trait]
pub trait SeedRepository: Send + Sync {
    /// `DROP TABLE IF EXISTS ... CASCADE`
    async fn drop_table(&self, table: Table) -> DbResult<()>;

    /// `CREATE TABLE IF NOT EXISTS ...`
    async fn create_table(&self, table: Table) -> DbResult<()>;

    async fn insert_user(&self, user: &HashedUser) -> DbResult<u64>;

    async fn insert_customer(&self, customer: &Customer) -> DbResult<u64>;

    async fn insert_invoice(&self, invoice: &SeedInvoice) -> DbResult<u64>;

    async fn insert_revenue(&self, revenue: &Revenue) -> DbResult<u64>;

    /// Release the underlying connections
    async fn close(&self);
}
