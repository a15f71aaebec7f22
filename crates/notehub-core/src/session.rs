//! Session facade wiring the client stack together
//!
//! One [`NotesSession`] owns the whole pipeline for one list screen:
//! configuration → API client → query cache → view → controllers. Mutations
//! (create, delete) invalidate the note-list cache and refresh the active
//! view so subscribers see the new server state.

use crate::form::{FormController, FormError};
use crate::search::SearchController;
use notehub_api::{ApiError, ClientConfig, Note, NotesApi, NotesService, Tag};
use notehub_cache::{QueryCache, QueryView, ViewSnapshot};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// One list screen's worth of client state
pub struct NotesSession {
    service: Arc<dyn NotesService>,
    cache: Arc<QueryCache>,
    view: QueryView,
    search: SearchController,
    form: Mutex<Option<Arc<FormController>>>,
}

impl NotesSession {
    /// Create a session against the live service
    #[must_use]
    pub fn new(config: ClientConfig, tag: Option<Tag>) -> Self {
        Self::with_service(Arc::new(NotesApi::new(config)), tag)
    }

    /// Create a session over any service implementation
    #[must_use]
    pub fn with_service(service: Arc<dyn NotesService>, tag: Option<Tag>) -> Self {
        let cache = Arc::new(QueryCache::new(Arc::clone(&service)));
        let view = QueryView::new(Arc::clone(&cache));
        let search = SearchController::new(view.clone(), tag);
        Self {
            service,
            cache,
            view,
            search,
            form: Mutex::new(None),
        }
    }

    /// Fetch the initial page (empty query, page 1, the session's tag)
    ///
    /// Call once after wiring subscribers.
    pub fn start(&self) {
        self.search.start();
    }

    /// Subscribe to list-view snapshot changes
    #[inline]
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.view.subscribe()
    }

    /// Current list-view snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        self.view.snapshot()
    }

    /// The search/pagination controller
    #[inline]
    #[must_use]
    pub fn search(&self) -> &SearchController {
        &self.search
    }

    /// Update the search text (debounced)
    pub fn set_query(&self, text: impl Into<String>) {
        self.search.set_query(text);
    }

    /// Jump to a page of the settled query
    pub fn set_page(&self, page: u32) {
        self.search.set_page(page);
    }

    /// Open a fresh create-note form, replacing any previous one
    pub fn open_form(&self) -> Arc<FormController> {
        let form = Arc::new(FormController::new(
            Arc::clone(&self.service),
            Arc::clone(&self.cache),
        ));
        *self.form.lock() = Some(Arc::clone(&form));
        form
    }

    /// The currently open form, if any
    #[inline]
    #[must_use]
    pub fn form(&self) -> Option<Arc<FormController>> {
        self.form.lock().clone()
    }

    /// Submit the open form
    ///
    /// On success the form is destroyed and the active view refreshed.
    ///
    /// # Errors
    /// - `FormError::NotEditing` when no form is open
    /// - Any [`FormError`] from the form itself; the form stays open
    pub async fn submit_form(&self) -> Result<Note, FormError> {
        let form = self.form.lock().clone().ok_or(FormError::NotEditing)?;
        let note = form.submit().await?;
        *self.form.lock() = None;
        self.view.refresh();
        Ok(note)
    }

    /// Discard the open form, if any
    pub fn cancel_form(&self) {
        if let Some(form) = self.form.lock().take() {
            form.cancel();
        }
    }

    /// Fetch a single note by id
    ///
    /// # Errors
    /// `ApiError::NotFound` for unknown ids, `ApiError::Transport` otherwise
    pub async fn get_note(&self, id: &str) -> Result<Note, ApiError> {
        self.service.get_note(id).await
    }

    /// Delete a note, then invalidate and refresh the list view
    ///
    /// # Errors
    /// `ApiError::NotFound` for unknown ids, `ApiError::Transport` otherwise
    pub async fn delete_note(&self, id: &str) -> Result<Note, ApiError> {
        let note = self.service.delete_note(id).await?;
        info!(id = %note.id, "note deleted");
        self.cache.invalidate_lists();
        self.view.refresh();
        Ok(note)
    }
}
