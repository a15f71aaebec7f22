//! NoteHub Cache - query cache and list views
//!
//! The fetch/caching layer between the UI controllers and the API client:
//! - [`QueryKey`]: identity of one list query (search, page, tag)
//! - [`QueryCache`]: keyed store with single-flight coalescing and
//!   invalidate-after-mutation
//! - [`QueryView`]: stale-while-revalidate view with watch-channel
//!   subscriptions
//!
//! # Example
//!
//! ```rust,ignore
//! use notehub_cache::{QueryCache, QueryKey, QueryView};
//! use std::sync::Arc;
//!
//! # async fn example(api: Arc<dyn notehub_api::NotesService>) {
//! let cache = Arc::new(QueryCache::new(api));
//! let view = QueryView::new(cache);
//!
//! let mut changes = view.subscribe();
//! view.activate(QueryKey::first_page("meeting", None));
//! changes.changed().await.unwrap();
//! # }
//! ```

pub mod key;
pub mod store;
pub mod view;

// Re-exports for convenience
pub use key::QueryKey;
pub use store::{CacheError, QueryCache};
pub use view::{QueryView, ViewSnapshot, ViewStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
