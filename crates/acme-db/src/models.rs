//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

/// Invoice joined with its customer, as shown on the invoice listing
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceListRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

impl InvoiceListRow {
    /// Convert to domain InvoiceId
    pub fn invoice_id(&self) -> acme_types::InvoiceId {
        acme_types::InvoiceId(self.id)
    }

    /// Convert to domain CustomerId
    pub fn customer_id(&self) -> acme_types::CustomerId {
        acme_types::CustomerId(self.customer_id)
    }
}
