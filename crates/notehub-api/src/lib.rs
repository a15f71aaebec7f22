//! NoteHub API - typed bindings for the hosted notes service
//!
//! Provides the data model, error taxonomy, process configuration, and the
//! HTTP client behind the [`NotesService`] trait:
//! - List notes with search text, page, and optional tag filter
//! - Fetch a single note by id
//! - Create a note from a validated draft
//! - Delete a note by id
//!
//! # Example
//!
//! ```rust,ignore
//! use notehub_api::{ClientConfig, NotesApi, NotesService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let api = NotesApi::new(config);
//!
//! let page = api.list_notes("meeting", 1, None).await?;
//! println!("{} pages", page.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use client::{NotesApi, NotesService};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_PER_PAGE};
pub use error::{ApiError, ConfigError};
pub use types::{Note, NoteDraft, PageResult, ParseTagError, Tag};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
