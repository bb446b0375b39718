//! PostgreSQL repository implementations

mod invoice;
mod seed;

pub use invoice::PgInvoiceRepository;
pub use seed::PgSeedRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub invoices: PgInvoiceRepository,
    pub seed: PgSeedRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            invoices: PgInvoiceRepository::new(pool.clone()),
            seed: PgSeedRepository::new(pool),
        }
    }
}
