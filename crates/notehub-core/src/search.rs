//! Search and pagination controller
//!
//! Owns the user-facing query text, the debounced search term derived from
//! it, and the current page, and drives the active key of a [`QueryView`]:
//! - `set_query` echoes the raw text immediately and arms a single
//!   cancellable trailing-edge timer; when the text has been quiet for
//!   500 ms the debounced term settles and the page resets to 1
//! - `set_page` changes the page directly and never touches the timer

use notehub_api::Tag;
use notehub_cache::{QueryKey, QueryView};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Quiet interval the raw query must hold before it settles
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(500);

/// Observable search state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Text as typed, echoed back to the input field
    pub raw_query: String,
    /// Settled search term, lags `raw_query` by the quiet interval
    pub debounced_query: String,
    /// Current page, 1-based
    pub page: u32,
    /// Tag filter bound to this controller
    pub tag: Option<Tag>,
}

impl SearchState {
    fn initial(tag: Option<Tag>) -> Self {
        Self {
            raw_query: String::new(),
            debounced_query: String::new(),
            page: 1,
            tag,
        }
    }

    /// Effective cache key for this state
    #[inline]
    #[must_use]
    pub fn key(&self) -> QueryKey {
        QueryKey::new(self.debounced_query.clone(), self.page, self.tag)
    }
}

struct SearchInner {
    state: Mutex<SearchState>,
    pending: Mutex<Option<JoinHandle<()>>>,
    view: QueryView,
    quiet: Duration,
}

impl Drop for SearchInner {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}

/// Controller for one searchable, paginated list
///
/// Cheap to clone; all clones share state. The tag filter is fixed for the
/// lifetime of the controller (a tag switch is a new list, not a mutation).
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<SearchInner>,
}

impl SearchController {
    /// Create a controller driving `view`, optionally filtered by `tag`
    #[must_use]
    pub fn new(view: QueryView, tag: Option<Tag>) -> Self {
        Self {
            inner: Arc::new(SearchInner {
                state: Mutex::new(SearchState::initial(tag)),
                pending: Mutex::new(None),
                view,
                quiet: DEBOUNCE_QUIET,
            }),
        }
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.inner.state.lock().clone()
    }

    /// Activate the current key without changing any state
    ///
    /// Call once after wiring subscribers, mirroring an initial page load.
    pub fn start(&self) {
        self.inner.view.activate(self.state().key());
    }

    /// Update the raw query and (re)arm the quiet timer
    ///
    /// The debounced term and page are untouched until the timer fires; a
    /// call before it fires aborts the armed timer and arms a fresh one.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.state.lock().raw_query = text.clone();

        let mut pending = self.inner.pending.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let inner = Arc::clone(&self.inner);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.quiet).await;
            let key = {
                let mut state = inner.state.lock();
                debug!(query = %text, "search term settled");
                state.debounced_query = text;
                state.page = 1;
                state.key()
            };
            inner.view.activate(key);
        }));
    }

    /// Jump to a page of the settled query
    ///
    /// No implicit clamping: pages beyond the last known total are issued
    /// unchanged and left to the server to answer.
    pub fn set_page(&self, page: u32) {
        let key = {
            let mut state = self.inner.state.lock();
            state.page = page;
            state.key()
        };

        let known = self.inner.view.snapshot().total_pages();
        if known != 0 && page > known {
            debug!(page, known, "page beyond last known total");
        }

        self.inner.view.activate(key);
    }
}
