//! Stale-while-revalidate view over the query cache
//!
//! A [`QueryView`] owns the two-slot model the list UI observes: the active
//! key currently wanted, and the last good key+data pair actually shown.
//! While a fetch for a new key is in flight the previous data stays visible;
//! there is never an intermediate blank state once anything has been shown.
//!
//! Completed fetches are applied only if their originating key still equals
//! the active key. In-flight requests are never cancelled; superseded
//! responses are simply discarded on arrival.

use crate::key::QueryKey;
use crate::store::{CacheError, QueryCache};
use notehub_api::{Note, PageResult};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Observable status of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    /// No data has been shown for any key yet
    Loading,
    /// The latest fetch for the active key failed; stale data may remain
    Error,
    /// Data is available, possibly from a prior key while revalidating
    Ready,
}

/// Point-in-time state of a view
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    /// Key the view currently wants
    pub active_key: Option<QueryKey>,
    /// Last good result, possibly fetched under a prior key
    pub data: Option<Arc<PageResult>>,
    /// Key `data` was fetched under
    pub data_key: Option<QueryKey>,
    /// Failure of the latest fetch for the active key
    pub error: Option<CacheError>,
    /// Whether a fetch for the active key is in flight
    pub fetching: bool,
}

impl ViewSnapshot {
    fn idle() -> Self {
        Self {
            active_key: None,
            data: None,
            data_key: None,
            error: None,
            fetching: false,
        }
    }

    /// Derived status
    #[inline]
    #[must_use]
    pub fn status(&self) -> ViewStatus {
        if self.error.is_some() {
            ViewStatus::Error
        } else if self.data.is_none() {
            ViewStatus::Loading
        } else {
            ViewStatus::Ready
        }
    }

    /// Notes to render, empty before any data arrives
    #[inline]
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        self.data.as_deref().map_or(&[], |page| &page.notes)
    }

    /// Last known page count, zero before any data arrives
    #[inline]
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.data.as_deref().map_or(0, |page| page.total_pages)
    }
}

/// Handle to one logical list view
///
/// Cheap to clone; all clones observe and drive the same state.
#[derive(Clone)]
pub struct QueryView {
    cache: Arc<QueryCache>,
    state: Arc<watch::Sender<ViewSnapshot>>,
}

impl QueryView {
    /// Create an idle view over a cache
    #[must_use]
    pub fn new(cache: Arc<QueryCache>) -> Self {
        Self {
            cache,
            state: Arc::new(watch::Sender::new(ViewSnapshot::idle())),
        }
    }

    /// Subscribe to snapshot changes
    #[inline]
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.state.subscribe()
    }

    /// Current snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.borrow().clone()
    }

    /// Make `key` the active key and start a fetch for it
    ///
    /// Previously shown data stays in place until the new fetch resolves.
    pub fn activate(&self, key: QueryKey) {
        debug!(%key, "activating view key");
        self.state.send_modify(|snapshot| {
            snapshot.active_key = Some(key.clone());
            snapshot.fetching = true;
            snapshot.error = None;
        });

        let view = self.clone();
        tokio::spawn(async move {
            let result = view.cache.fetch(&key).await;
            view.apply(key, result);
        });
    }

    /// Refetch the active key, if any
    pub fn refresh(&self) {
        let active = self.state.borrow().active_key.clone();
        if let Some(key) = active {
            self.activate(key);
        }
    }

    /// Apply a completed fetch, discarding it when its key was superseded
    fn apply(&self, key: QueryKey, result: Result<Arc<PageResult>, CacheError>) {
        self.state.send_modify(|snapshot| {
            if snapshot.active_key.as_ref() != Some(&key) {
                debug!(%key, "discarding superseded response");
                return;
            }
            snapshot.fetching = false;
            match result {
                Ok(page) => {
                    snapshot.data = Some(page);
                    snapshot.data_key = Some(key);
                    snapshot.error = None;
                }
                Err(err) => {
                    snapshot.error = Some(err);
                }
            }
        });
    }
}
