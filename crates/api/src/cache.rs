//! Rendered page cache with path-based revalidation.

use moka::future::Cache;
use telemetry::metrics;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::response::PageView;

/// Cache of rendered pages keyed by path plus query string.
#[derive(Clone)]
pub struct PageCache {
    cache: Cache<String, PageView>,
}

impl PageCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(config.page_capacity)
                .time_to_live(config.page_ttl())
                .support_invalidation_closures()
                .build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<PageView> {
        let page = self.cache.get(key).await;
        if page.is_some() {
            metrics().page_cache_hits.inc();
        } else {
            metrics().page_cache_misses.inc();
        }
        page
    }

    /// Cache a page if it rendered successfully.
    pub async fn insert(&self, key: impl Into<String>, page: PageView) {
        if page.is_cacheable() {
            self.cache.insert(key.into(), page).await;
        }
    }

    /// Drop `path` and every cached query variant of it (`path?…`).
    pub async fn revalidate(&self, path: &str) {
        metrics().page_revalidations.inc();
        self.cache.invalidate(path).await;

        let prefix = format!("{}?", path);
        if let Err(e) = self
            .cache
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
        {
            warn!(path, error = %e, "Failed to invalidate cached page variants");
        }

        debug!(path, "Revalidated page");
    }
}
