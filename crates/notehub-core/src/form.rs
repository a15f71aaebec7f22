//! Create-note form controller
//!
//! Field state, local validation, and the submit state machine:
//! `Editing → Submitting → { Closed | Editing }`. Local validation failures
//! never reach the network; a server failure returns the form to `Editing`
//! with every entered value retained.

use notehub_api::{ApiError, Note, NoteDraft, Tag};
use notehub_cache::QueryCache;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// Minimum title length in characters
pub const TITLE_MIN: usize = 3;
/// Maximum title length in characters
pub const TITLE_MAX: usize = 50;
/// Maximum content length in characters
pub const CONTENT_MAX: usize = 500;

/// Lifecycle of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    /// Accepting field edits
    Editing,
    /// Create request in flight
    Submitting,
    /// Cancelled or successfully submitted
    Closed,
}

/// Raw field values as entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    /// Note title, required, 3-50 characters
    pub title: String,
    /// Note body, optional, at most 500 characters
    pub content: String,
    /// Tag name, must be one of the five enumerated values
    pub tag: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tag: Tag::Todo.to_string(),
        }
    }
}

impl FormFields {
    /// Validate field values
    ///
    /// Pure: no I/O, no state. An absent message means the field is valid.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        let title_len = self.title.chars().count();
        if title_len == 0 {
            errors.title = Some("title is required".to_string());
        } else if title_len < TITLE_MIN {
            errors.title = Some(format!("title must be at least {TITLE_MIN} characters"));
        } else if title_len > TITLE_MAX {
            errors.title = Some(format!("title must be at most {TITLE_MAX} characters"));
        }

        if self.content.chars().count() > CONTENT_MAX {
            errors.content = Some(format!("content must be at most {CONTENT_MAX} characters"));
        }

        if self.tag.parse::<Tag>().is_err() {
            errors.tag = Some("tag must be one of Todo, Work, Personal, Meeting, Shopping".to_string());
        }

        errors
    }

    /// Build the create payload, failing with per-field errors
    ///
    /// # Errors
    /// `FieldErrors` when any field is invalid
    pub fn to_draft(&self) -> Result<NoteDraft, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let tag = self.tag.parse().map_err(|_| FieldErrors {
            tag: Some("tag must be one of Todo, Work, Personal, Meeting, Shopping".to_string()),
            ..FieldErrors::default()
        })?;
        Ok(NoteDraft::new(self.title.clone(), self.content.clone(), tag))
    }
}

/// Per-field validation messages; absent means valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Title message
    pub title: Option<String>,
    /// Content message
    pub content: Option<String>,
    /// Tag message
    pub tag: Option<String>,
}

impl FieldErrors {
    /// Check whether every field is valid
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tag.is_none()
    }
}

/// Form submission failure
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Local validation rejected the fields; nothing was sent
    #[error("form has validation errors")]
    Invalid(FieldErrors),

    /// The form is not accepting a submit (already submitting or closed)
    #[error("form is not editable")]
    NotEditing,

    /// The server rejected or the request failed; fields are retained
    #[error("create failed: {0}")]
    Create(#[from] ApiError),
}

struct FormInner {
    fields: FormFields,
    errors: FieldErrors,
    status: FormStatus,
}

/// Controller for one create-note form
///
/// Created when the form opens; discarded on cancel or successful submit.
pub struct FormController {
    service: Arc<dyn notehub_api::NotesService>,
    cache: Arc<QueryCache>,
    state: Mutex<FormInner>,
}

impl FormController {
    /// Open a fresh form
    #[must_use]
    pub fn new(service: Arc<dyn notehub_api::NotesService>, cache: Arc<QueryCache>) -> Self {
        Self {
            service,
            cache,
            state: Mutex::new(FormInner {
                fields: FormFields::default(),
                errors: FieldErrors::default(),
                status: FormStatus::Editing,
            }),
        }
    }

    /// Current field values
    #[inline]
    #[must_use]
    pub fn fields(&self) -> FormFields {
        self.state.lock().fields.clone()
    }

    /// Current per-field messages
    #[inline]
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.state.lock().errors.clone()
    }

    /// Current lifecycle state
    #[inline]
    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.state.lock().status
    }

    /// Set the title and re-validate
    pub fn set_title(&self, title: impl Into<String>) {
        let mut state = self.state.lock();
        state.fields.title = title.into();
        state.errors = state.fields.validate();
    }

    /// Set the content and re-validate
    pub fn set_content(&self, content: impl Into<String>) {
        let mut state = self.state.lock();
        state.fields.content = content.into();
        state.errors = state.fields.validate();
    }

    /// Set the tag and re-validate
    pub fn set_tag(&self, tag: impl Into<String>) {
        let mut state = self.state.lock();
        state.fields.tag = tag.into();
        state.errors = state.fields.validate();
    }

    /// Validate and submit the draft
    ///
    /// On success the note-list cache is invalidated and the form closes.
    /// On any failure the entered values survive.
    ///
    /// # Errors
    /// - `FormError::Invalid` when local validation fails (no request made)
    /// - `FormError::NotEditing` when the form is not in `Editing`
    /// - `FormError::Create` when the server rejects or the request fails
    pub async fn submit(&self) -> Result<Note, FormError> {
        let draft = {
            let mut state = self.state.lock();
            if state.status != FormStatus::Editing {
                return Err(FormError::NotEditing);
            }
            match state.fields.to_draft() {
                Ok(draft) => {
                    state.errors = FieldErrors::default();
                    state.status = FormStatus::Submitting;
                    draft
                }
                Err(errors) => {
                    state.errors = errors.clone();
                    return Err(FormError::Invalid(errors));
                }
            }
        };

        match self.service.create_note(&draft).await {
            Ok(note) => {
                self.cache.invalidate_lists();
                self.state.lock().status = FormStatus::Closed;
                info!(id = %note.id, "note created");
                Ok(note)
            }
            Err(err) => {
                self.state.lock().status = FormStatus::Editing;
                Err(FormError::Create(err))
            }
        }
    }

    /// Discard all field state unconditionally
    pub fn cancel(&self) {
        let mut state = self.state.lock();
        state.fields = FormFields::default();
        state.errors = FieldErrors::default();
        state.status = FormStatus::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notehub_test_utils::TestNotes;
    use proptest::prelude::*;

    fn fields(title: &str, content: &str, tag: &str) -> FormFields {
        FormFields {
            title: title.to_string(),
            content: content.to_string(),
            tag: tag.to_string(),
        }
    }

    fn form_over(service: Arc<TestNotes>) -> FormController {
        let cache = Arc::new(QueryCache::new(
            Arc::clone(&service) as Arc<dyn notehub_api::NotesService>,
        ));
        FormController::new(service, cache)
    }

    #[test]
    fn title_length_boundaries() {
        assert!(fields("ab", "", "Todo").validate().title.is_some());
        assert!(fields("abc", "", "Todo").validate().title.is_none());
        assert!(fields(&"a".repeat(50), "", "Todo").validate().title.is_none());
        assert!(fields(&"a".repeat(51), "", "Todo").validate().title.is_some());
        assert!(fields("", "", "Todo").validate().title.is_some());
    }

    #[test]
    fn content_length_boundaries() {
        assert!(fields("abc", &"c".repeat(500), "Todo").validate().content.is_none());
        assert!(fields("abc", &"c".repeat(501), "Todo").validate().content.is_some());
        assert!(fields("abc", "", "Todo").validate().content.is_none());
    }

    #[test]
    fn tag_must_be_enumerated() {
        assert!(fields("abc", "", "Todo").validate().tag.is_none());
        assert!(fields("abc", "", "Groceries").validate().tag.is_some());
        assert!(fields("abc", "", "").validate().tag.is_some());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // Three characters, six bytes.
        assert!(fields("äöü", "", "Todo").validate().title.is_none());
    }

    #[tokio::test]
    async fn invalid_fields_never_reach_the_network() {
        let service = Arc::new(TestNotes::new());
        let form = form_over(Arc::clone(&service));

        form.set_title("ab");
        let err = form.submit().await.unwrap_err();

        assert!(matches!(err, FormError::Invalid(_)));
        assert!(service.create_calls().is_empty());
        assert_eq!(form.status(), FormStatus::Editing);
        assert!(form.errors().title.is_some());
    }

    #[tokio::test]
    async fn successful_submit_invalidates_and_closes() {
        let service = Arc::new(TestNotes::new());
        let cache = Arc::new(QueryCache::new(
            Arc::clone(&service) as Arc<dyn notehub_api::NotesService>,
        ));
        let form = FormController::new(
            Arc::clone(&service) as Arc<dyn notehub_api::NotesService>,
            Arc::clone(&cache),
        );

        let key = notehub_cache::QueryKey::first_page("", None);
        cache.fetch(&key).await.unwrap();
        assert_eq!(service.list_calls().len(), 1);

        form.set_title("Grocery run");
        form.set_tag("Shopping");
        let note = form.submit().await.unwrap();

        assert_eq!(note.title, "Grocery run");
        assert_eq!(form.status(), FormStatus::Closed);
        assert_eq!(service.create_calls().len(), 1);

        // The cached list entry is stale now; the next access refetches.
        cache.fetch(&key).await.unwrap();
        assert_eq!(service.list_calls().len(), 2);
    }

    #[tokio::test]
    async fn server_rejection_keeps_entered_fields() {
        let service = Arc::new(TestNotes::new());
        service.set_create_rejection(true);
        let form = form_over(Arc::clone(&service));

        form.set_title("Grocery run");
        form.set_content("milk, eggs");
        let err = form.submit().await.unwrap_err();

        assert!(matches!(err, FormError::Create(ApiError::Validation { .. })));
        assert_eq!(form.status(), FormStatus::Editing);
        let retained = form.fields();
        assert_eq!(retained.title, "Grocery run");
        assert_eq!(retained.content, "milk, eggs");
    }

    #[tokio::test]
    async fn cancel_discards_everything() {
        let service = Arc::new(TestNotes::new());
        let form = form_over(service);

        form.set_title("Half-typed");
        form.set_content("draft");
        form.cancel();

        assert_eq!(form.status(), FormStatus::Closed);
        assert_eq!(form.fields(), FormFields::default());
        assert!(form.errors().is_empty());
    }

    proptest! {
        #[test]
        fn prop_title_valid_iff_within_bounds(len in 0usize..=60) {
            let form_fields = fields(&"x".repeat(len), "", "Todo");
            let valid = form_fields.validate().title.is_none();
            prop_assert_eq!(valid, (TITLE_MIN..=TITLE_MAX).contains(&len));
        }

        #[test]
        fn prop_content_valid_iff_within_bounds(len in 0usize..=600) {
            let form_fields = fields("abc", &"x".repeat(len), "Todo");
            let valid = form_fields.validate().content.is_none();
            prop_assert_eq!(valid, len <= CONTENT_MAX);
        }
    }
}
