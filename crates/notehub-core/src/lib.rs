//! NoteHub Core - client-side controllers for the notes UI
//!
//! The stateful layer between user input and the fetch/cache stack:
//! - Debounced search and pagination driving the list view's cache key
//! - Create-note form with local validation and a submit state machine
//! - A session facade wiring configuration, client, cache, and view
//!
//! # Example
//!
//! ```rust,ignore
//! use notehub_api::ClientConfig;
//! use notehub_core::NotesSession;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = NotesSession::new(ClientConfig::from_env()?, None);
//! let mut changes = session.subscribe();
//!
//! session.start();
//! session.set_query("meeting");
//!
//! changes.changed().await?;
//! println!("{} notes", changes.borrow().notes().len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod form;
pub mod search;
pub mod session;

// Re-exports for convenience
pub use form::{
    FieldErrors, FormController, FormError, FormFields, FormStatus, CONTENT_MAX, TITLE_MAX,
    TITLE_MIN,
};
pub use search::{SearchController, SearchState, DEBOUNCE_QUIET};
pub use session::NotesSession;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the NoteHub client
    pub use crate::{FormController, FormStatus, NotesSession, SearchController};
    pub use notehub_api::{ClientConfig, Note, NoteDraft, Tag};
    pub use notehub_cache::{QueryKey, ViewSnapshot, ViewStatus};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
