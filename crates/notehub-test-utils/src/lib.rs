//! Testing utilities for the NoteHub client workspace
//!
//! Shared fixtures and a scriptable fake [`NotesService`].

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::Utc;
use notehub_api::{ApiError, Note, NoteDraft, NotesService, PageResult, Tag};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Semaphore;
use uuid::Uuid;

pub fn sample_note(title: &str, tag: Tag) -> Note {
    let now = Utc::now();
    Note {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        content: String::new(),
        tag,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_page(titles: &[&str], total_pages: u32) -> PageResult {
    PageResult {
        notes: titles.iter().map(|t| sample_note(t, Tag::Todo)).collect(),
        total_pages,
    }
}

/// One recorded list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCall {
    pub search: String,
    pub page: u32,
    pub tag: Option<Tag>,
}

/// Scriptable in-memory stand-in for the notes service.
///
/// List responses are derived from the request so tests can tell results
/// apart: each page carries one note titled `"<search>#p<page>"`. A gated
/// fake parks every list call until [`release`](TestNotes::release) grants
/// a permit, which makes in-flight ordering deterministic.
pub struct TestNotes {
    list_calls: Mutex<Vec<ListCall>>,
    create_calls: Mutex<Vec<NoteDraft>>,
    delete_calls: Mutex<Vec<String>>,
    gate: Option<Semaphore>,
    fail_lists: AtomicBool,
    reject_creates: AtomicBool,
    total_pages: u32,
}

impl TestNotes {
    pub fn new() -> Self {
        Self {
            list_calls: Mutex::new(Vec::new()),
            create_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            gate: None,
            fail_lists: AtomicBool::new(false),
            reject_creates: AtomicBool::new(false),
            total_pages: 3,
        }
    }

    /// Fake whose list calls block until released.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = total_pages;
        self
    }

    /// Allow `n` gated list calls to proceed.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn set_list_failure(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn set_create_rejection(&self, reject: bool) {
        self.reject_creates.store(reject, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> Vec<ListCall> {
        self.list_calls.lock().clone()
    }

    pub fn create_calls(&self) -> Vec<NoteDraft> {
        self.create_calls.lock().clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().clone()
    }

    fn page_for(&self, search: &str, page: u32, tag: Option<Tag>) -> PageResult {
        let title = format!("{search}#p{page}");
        PageResult {
            notes: vec![sample_note(&title, tag.unwrap_or(Tag::Todo))],
            total_pages: self.total_pages,
        }
    }
}

impl Default for TestNotes {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotesService for TestNotes {
    async fn list_notes(
        &self,
        search: &str,
        page: u32,
        tag: Option<Tag>,
    ) -> Result<PageResult, ApiError> {
        self.list_calls.lock().push(ListCall {
            search: search.to_string(),
            page,
            tag,
        });

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ApiError::Transport {
                message: "simulated outage".to_string(),
            });
        }

        Ok(self.page_for(search, page, tag))
    }

    async fn get_note(&self, id: &str) -> Result<Note, ApiError> {
        let mut note = sample_note("fetched", Tag::Todo);
        note.id = id.to_string();
        Ok(note)
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        self.create_calls.lock().push(draft.clone());

        if self.reject_creates.load(Ordering::SeqCst) {
            return Err(ApiError::Validation {
                message: "rejected by server".to_string(),
            });
        }

        let mut note = sample_note(&draft.title, draft.tag);
        note.content = draft.content.clone();
        Ok(note)
    }

    async fn delete_note(&self, id: &str) -> Result<Note, ApiError> {
        self.delete_calls.lock().push(id.to_string());
        let mut note = sample_note("deleted", Tag::Todo);
        note.id = id.to_string();
        Ok(note)
    }
}
