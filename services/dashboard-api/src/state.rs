//! Application state for the Dashboard API service.

use std::sync::Arc;

use acme_db::{InvoiceListRow, InvoiceRepository};

use crate::config::Config;
use crate::revalidate::{CacheConfig, PageCache};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Invoice storage
    pub invoices: Arc<dyn InvoiceRepository>,
    /// Cached listing pages, revalidated on write
    pub pages: PageCache<Vec<InvoiceListRow>>,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(invoices: Arc<dyn InvoiceRepository>, config: Config) -> Self {
        let pages = PageCache::new(CacheConfig::default().with_ttl(config.listing_cache_ttl));
        Self {
            invoices,
            pages,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}
