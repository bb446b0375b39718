//! Path-keyed page cache
//!
//! Read handlers serve their payload from here; write handlers call
//! [`PageCache::revalidate_path`] after a successful write so the next read
//! of that path reloads from storage.
//!
//! ```ignore
//! let cache = PageCache::new(CacheConfig::default());
//!
//! let rows = cache.get_or_load(INVOICES_PATH, || repo.find_latest(50)).await?;
//!
//! // after an insert
//! cache.revalidate_path(INVOICES_PATH).await;
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use moka::future::Cache;
use tracing::instrument;

/// Listing page for invoices; also the redirect target after a create.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Configuration for the page cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Upper bound on entry lifetime when no write revalidates it.
    /// Default: 5 minutes
    pub ttl: Duration,

    /// Maximum number of cached paths.
    /// Default: 64
    pub max_paths: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_paths: 64,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// A cached payload and the path generation it was loaded under
struct Page<V> {
    generation: u64,
    value: Arc<V>,
}

impl<V> Clone for Page<V> {
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            value: self.value.clone(),
        }
    }
}

/// Cached page payloads keyed by request path.
///
/// Every [`PageCache::revalidate_path`] bumps the path's generation. A page
/// only counts as a hit while its generation is current, so a load that
/// started before a revalidation can never be served after it.
pub struct PageCache<V> {
    pages: Cache<String, Page<V>>,
    generations: Arc<DashMap<String, u64>>,
    config: CacheConfig,
}

impl<V> Clone for PageCache<V> {
    fn clone(&self) -> Self {
        Self {
            pages: self.pages.clone(),
            generations: self.generations.clone(),
            config: self.config.clone(),
        }
    }
}

impl<V> std::fmt::Debug for PageCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCache")
            .field("config", &self.config)
            .field("entries", &self.pages.entry_count())
            .finish()
    }
}

impl<V> PageCache<V>
where
    V: Send + Sync + 'static,
{
    pub fn new(config: CacheConfig) -> Self {
        let pages = Cache::builder()
            .max_capacity(config.max_paths)
            .time_to_live(config.ttl)
            .build();

        Self {
            pages,
            generations: Arc::new(DashMap::new()),
            config,
        }
    }

    fn generation(&self, path: &str) -> u64 {
        self.generations.get(path).map_or(0, |g| *g)
    }

    /// Serve `path` from cache, loading and storing it on a miss.
    ///
    /// Load errors are returned as-is and nothing is cached.
    #[instrument(skip(self, load), level = "debug")]
    pub async fn get_or_load<F, Fut, E>(&self, path: &str, load: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let generation = self.generation(path);

        if let Some(page) = self.pages.get(path).await {
            if page.generation == generation {
                tracing::trace!("page cache hit");
                metrics::counter!("dashboard_page_cache_hits_total", "path" => path.to_string())
                    .increment(1);
                return Ok(page.value);
            }
        }

        metrics::counter!("dashboard_page_cache_misses_total", "path" => path.to_string())
            .increment(1);

        let value = Arc::new(load().await?);

        // A revalidation landed while loading: hand the result to this
        // caller only.
        if self.generation(path) != generation {
            tracing::debug!(path, "Discarding page loaded before revalidation");
            return Ok(value);
        }

        let page = Page {
            generation,
            value: value.clone(),
        };
        self.pages.insert(path.to_string(), page).await;
        Ok(value)
    }

    /// Invalidate the cached payload for `path`, including any load still in
    /// flight; the next read reloads it.
    pub async fn revalidate_path(&self, path: &str) {
        *self.generations.entry(path.to_string()).or_insert(0) += 1;
        self.pages.invalidate(path).await;
        tracing::debug!(path, "Path revalidated");
    }

    /// Whether `path` currently has a servable cached payload.
    pub async fn is_cached(&self, path: &str) -> bool {
        let generation = self.generation(path);
        self.pages
            .get(path)
            .await
            .is_some_and(|page| page.generation == generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache: PageCache<Vec<u32>> = PageCache::new(CacheConfig::default());
        let loads = AtomicUsize::new(0);

        for _ in 0..2 {
            let page = cache
                .get_or_load(INVOICES_PATH, || async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(*page, vec![1, 2, 3]);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_revalidate_forces_reload() {
        let cache: PageCache<u32> = PageCache::new(CacheConfig::default());

        cache
            .get_or_load(INVOICES_PATH, || async { Ok::<_, ()>(1) })
            .await
            .unwrap();
        assert!(cache.is_cached(INVOICES_PATH).await);

        cache.revalidate_path(INVOICES_PATH).await;
        assert!(!cache.is_cached(INVOICES_PATH).await);

        let page = cache
            .get_or_load(INVOICES_PATH, || async { Ok::<_, ()>(2) })
            .await
            .unwrap();
        assert_eq!(*page, 2);
    }

    #[tokio::test]
    async fn test_load_error_is_not_cached() {
        let cache: PageCache<u32> = PageCache::new(CacheConfig::default());

        let err = cache
            .get_or_load(INVOICES_PATH, || async { Err::<u32, _>("down") })
            .await
            .unwrap_err();
        assert_eq!(err, "down");
        assert!(!cache.is_cached(INVOICES_PATH).await);
    }

    #[tokio::test]
    async fn test_revalidate_during_load_discards_stale_page() {
        let cache: PageCache<u32> = PageCache::new(CacheConfig::default());
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        // Reader snapshots the listing before the write lands
        let reader = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .get_or_load(INVOICES_PATH, || async move {
                        started_tx.send(()).unwrap();
                        release_rx.await.unwrap();
                        Ok::<_, ()>(0)
                    })
                    .await
                    .unwrap()
            })
        };

        started_rx.await.unwrap();
        cache.revalidate_path(INVOICES_PATH).await;
        release_tx.send(()).unwrap();

        assert_eq!(*reader.await.unwrap(), 0);
        assert!(!cache.is_cached(INVOICES_PATH).await);

        let page = cache
            .get_or_load(INVOICES_PATH, || async { Ok::<_, ()>(1) })
            .await
            .unwrap();
        assert_eq!(*page, 1);
        assert!(cache.is_cached(INVOICES_PATH).await);
    }

    #[tokio::test]
    async fn test_revalidating_one_path_keeps_others() {
        let cache: PageCache<u32> = PageCache::new(CacheConfig::default());

        for path in [INVOICES_PATH, "/dashboard"] {
            cache
                .get_or_load(path, || async { Ok::<_, ()>(0) })
                .await
                .unwrap();
        }

        cache.revalidate_path(INVOICES_PATH).await;
        assert!(cache.is_cached("/dashboard").await);
    }
}
