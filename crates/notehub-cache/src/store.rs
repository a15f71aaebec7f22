//! Keyed cache of list results using moka
//!
//! Stores one immutable [`PageResult`] per [`QueryKey`]:
//! - Single-flight: concurrent fetches for the same key share one request
//! - Generation-based invalidation after mutations
//! - A new fetch under a key replaces the stored entry

use crate::key::QueryKey;
use moka::future::Cache;
use notehub_api::{ApiError, NotesService, PageResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Default capacity of the entry store
const DEFAULT_CAPACITY: u64 = 256;

/// Cache-layer failure
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// Underlying list request failed
    #[error("list fetch failed: {0}")]
    Fetch(#[source] Arc<ApiError>),
}

/// One stored page with the invalidation generation it was fetched under
#[derive(Clone)]
struct CachedPage {
    result: Arc<PageResult>,
    generation: u64,
}

/// Keyed cache of note-list fetches
///
/// Entries are immutable once stored; consumers only ever see them through
/// `Arc`. Invalidation bumps a generation counter, turning every older entry
/// into a miss on its next access.
pub struct QueryCache {
    service: Arc<dyn NotesService>,
    entries: Cache<QueryKey, CachedPage>,
    generation: AtomicU64,
}

impl QueryCache {
    /// Create a cache over a notes service with default capacity
    #[inline]
    #[must_use]
    pub fn new(service: Arc<dyn NotesService>) -> Self {
        Self::with_capacity(service, DEFAULT_CAPACITY)
    }

    /// Create with an explicit entry capacity
    #[inline]
    #[must_use]
    pub fn with_capacity(service: Arc<dyn NotesService>, max_capacity: u64) -> Self {
        Self {
            service,
            entries: Cache::new(max_capacity),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the result for `key`, fetching on miss or staleness
    ///
    /// Concurrent calls for the same key coalesce into one underlying list
    /// request; every waiter receives the same result, success or failure.
    ///
    /// # Errors
    /// `CacheError::Fetch` when the underlying list request fails. Nothing is
    /// stored in that case, so the next access retries.
    pub async fn fetch(&self, key: &QueryKey) -> Result<Arc<PageResult>, CacheError> {
        let current = self.generation.load(Ordering::Acquire);

        if let Some(entry) = self.entries.get(key).await {
            if entry.generation >= current {
                debug!(%key, "cache hit");
                return Ok(entry.result);
            }
            // Stale entry: evict so the single-flight below refetches. The
            // last-good data a view is showing lives in the view, not here.
            debug!(%key, "cache entry stale");
            self.entries.invalidate(key).await;
        }

        let service = Arc::clone(&self.service);
        let fetch_key = key.clone();
        let entry = self
            .entries
            .try_get_with(key.clone(), async move {
                debug!(key = %fetch_key, "issuing list request");
                let page = service
                    .list_notes(&fetch_key.search, fetch_key.page, fetch_key.tag)
                    .await?;
                Ok::<_, ApiError>(CachedPage {
                    result: Arc::new(page),
                    generation: current,
                })
            })
            .await
            .map_err(CacheError::Fetch)?;

        Ok(entry.result)
    }

    /// Mark every cached list entry stale, forcing a refetch on next access
    ///
    /// Called after a successful create or delete.
    #[inline]
    pub fn invalidate_lists(&self) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(generation, "invalidated note lists");
    }

    /// Approximate number of stored entries
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notehub_test_utils::TestNotes;

    fn cache_over(service: Arc<TestNotes>) -> QueryCache {
        QueryCache::new(service)
    }

    #[tokio::test]
    async fn fetch_caches_by_key() {
        let service = Arc::new(TestNotes::new());
        let cache = cache_over(Arc::clone(&service));
        let key = QueryKey::first_page("meeting", None);

        let first = cache.fetch(&key).await.unwrap();
        let second = cache.fetch(&key).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.list_calls().len(), 1);
    }

    #[tokio::test]
    async fn distinct_keys_fetch_separately() {
        let service = Arc::new(TestNotes::new());
        let cache = cache_over(Arc::clone(&service));

        cache.fetch(&QueryKey::new("a", 1, None)).await.unwrap();
        cache.fetch(&QueryKey::new("a", 2, None)).await.unwrap();

        assert_eq!(service.list_calls().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_fetches_coalesce_to_one_request() {
        let service = Arc::new(TestNotes::gated());
        let cache = Arc::new(cache_over(Arc::clone(&service)));
        let key = QueryKey::first_page("meeting", None);

        let mut tasks = Vec::new();
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            tasks.push(tokio::spawn(async move { cache.fetch(&key).await }));
        }

        service.release(1);

        let mut results = Vec::new();
        for task in tasks {
            results.push(task.await.unwrap().unwrap());
        }

        assert_eq!(service.list_calls().len(), 1);
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let service = Arc::new(TestNotes::new());
        let cache = cache_over(Arc::clone(&service));
        let key = QueryKey::first_page("", None);

        cache.fetch(&key).await.unwrap();
        cache.fetch(&key).await.unwrap();
        assert_eq!(service.list_calls().len(), 1);

        cache.invalidate_lists();

        cache.fetch(&key).await.unwrap();
        assert_eq!(service.list_calls().len(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let service = Arc::new(TestNotes::new());
        let cache = cache_over(Arc::clone(&service));
        let key = QueryKey::first_page("", None);

        service.set_list_failure(true);
        let err = cache.fetch(&key).await.unwrap_err();
        assert!(matches!(err, CacheError::Fetch(_)));

        service.set_list_failure(false);
        cache.fetch(&key).await.unwrap();

        assert_eq!(service.list_calls().len(), 2);
    }
}
