//! PostgreSQL seed repository implementation

use acme_types::{Customer, HashedUser, Revenue, SeedInvoice};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::repo::SeedRepository;
use crate::schema::{Table, UUID_EXTENSION_SQL};

/// PostgreSQL seed repository
#[derive(Clone)]
pub struct PgSeedRepository {
    pool: PgPool,
}

impl PgSeedRepository {
    /// Create a new seed repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeedRepository for PgSeedRepository {
    async fn drop_table(&self, table: Table) -> DbResult<()> {
        sqlx::query(table.drop_sql()).execute(&self.pool).await?;
        Ok(())
    }

    async fn create_table(&self, table: Table) -> DbResult<()> {
        if table.uses_uuid_key() {
            sqlx::query(UUID_EXTENSION_SQL).execute(&self.pool).await?;
        }
        sqlx::query(table.create_sql()).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, user: &HashedUser) -> DbResult<u64> {
        let result = sqlx::query(Table::Users.insert_sql())
            .bind(user.id.0)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_customer(&self, customer: &Customer) -> DbResult<u64> {
        let result = sqlx::query(Table::Customers.insert_sql())
            .bind(customer.id.0)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.image_url)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_invoice(&self, invoice: &SeedInvoice) -> DbResult<u64> {
        let result = sqlx::query(Table::Invoices.insert_sql())
            .bind(invoice.customer_id)
            .bind(invoice.amount)
            .bind(invoice.status.as_str())
            .bind(invoice.date)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_revenue(&self, revenue: &Revenue) -> DbResult<u64> {
        let result = sqlx::query(Table::Revenue.insert_sql())
            .bind(&revenue.month)
            .bind(revenue.revenue)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        crate::pool::close_pool(&self.pool).await;
    }
}
