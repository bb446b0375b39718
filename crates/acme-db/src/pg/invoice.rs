//! PostgreSQL invoice repository implementation

use acme_types::InvoiceId;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::InvoiceListRow;
use crate::repo::{CreateInvoice, InvoiceRepository};

/// PostgreSQL invoice repository
#[derive(Clone)]
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    /// Create a new invoice repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    async fn create(&self, invoice: CreateInvoice) -> DbResult<InvoiceId> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO invoices (customer_id, amount, status, date)
            VALUES ($1::uuid, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&invoice.customer_id)
        .bind(invoice.amount)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(InvoiceId(id))
    }

    async fn find_latest(&self, limit: i64) -> DbResult<Vec<InvoiceListRow>> {
        let invoices = sqlx::query_as::<_, InvoiceListRow>(
            r#"
            SELECT invoices.id, invoices.customer_id, customers.name, customers.email,
                   customers.image_url, invoices.amount, invoices.status, invoices.date
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            ORDER BY invoices.date DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
