//! End-to-end flows through the session facade against a fake service.

use notehub_core::{FormError, NotesSession};
use notehub_test_utils::{ListCall, TestNotes};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

fn call(search: &str, page: u32) -> ListCall {
    ListCall {
        search: search.to_string(),
        page,
        tag: None,
    }
}

#[tokio::test(start_paused = true)]
async fn search_then_paginate_hits_expected_keys() {
    let service = Arc::new(TestNotes::new());
    let session =
        NotesSession::with_service(Arc::clone(&service) as Arc<dyn notehub_api::NotesService>, None);

    session.start();
    settle().await;
    assert_eq!(service.list_calls(), vec![call("", 1)]);

    session.set_query("meeting");
    settle().await;
    tokio::time::advance(Duration::from_millis(500)).await;
    settle().await;
    assert_eq!(service.list_calls(), vec![call("", 1), call("meeting", 1)]);

    // Paging keeps the settled query and skips the debounce entirely.
    session.set_page(2);
    settle().await;
    assert_eq!(
        service.list_calls(),
        vec![call("", 1), call("meeting", 1), call("meeting", 2)]
    );

    // A further quiet interval settles nothing new.
    tokio::time::advance(Duration::from_millis(500)).await;
    settle().await;
    assert_eq!(service.list_calls().len(), 3);
    assert_eq!(session.search().state().page, 2);
}

#[tokio::test]
async fn create_invalidates_and_refreshes_the_list() {
    let service = Arc::new(TestNotes::new());
    let session =
        NotesSession::with_service(Arc::clone(&service) as Arc<dyn notehub_api::NotesService>, None);

    session.start();
    settle().await;
    assert_eq!(service.list_calls().len(), 1);

    let form = session.open_form();
    form.set_title("Sprint planning");
    form.set_tag("Meeting");

    let note = session.submit_form().await.unwrap();
    assert_eq!(note.title, "Sprint planning");
    assert!(session.form().is_none());
    settle().await;

    // The refresh refetched the active key instead of serving the cache.
    assert_eq!(service.create_calls().len(), 1);
    assert_eq!(service.list_calls(), vec![call("", 1), call("", 1)]);
    assert!(session.snapshot().data.is_some());
}

#[tokio::test]
async fn submit_without_open_form_is_rejected() {
    let service = Arc::new(TestNotes::new());
    let session = NotesSession::with_service(service, None);

    let err = session.submit_form().await.unwrap_err();
    assert!(matches!(err, FormError::NotEditing));
}

#[tokio::test]
async fn failed_submit_keeps_the_form_open() {
    let service = Arc::new(TestNotes::new());
    service.set_create_rejection(true);
    let session =
        NotesSession::with_service(Arc::clone(&service) as Arc<dyn notehub_api::NotesService>, None);

    let form = session.open_form();
    form.set_title("Sprint planning");

    let err = session.submit_form().await.unwrap_err();
    assert!(matches!(err, FormError::Create(_)));
    assert!(session.form().is_some());
    assert_eq!(session.form().unwrap().fields().title, "Sprint planning");
}

#[tokio::test]
async fn cancel_discards_the_form() {
    let service = Arc::new(TestNotes::new());
    let session = NotesSession::with_service(service, None);

    let form = session.open_form();
    form.set_title("Half-typed");
    session.cancel_form();

    assert!(session.form().is_none());
    assert_eq!(form.fields().title, "");
}

#[tokio::test]
async fn delete_invalidates_and_refreshes_the_list() {
    let service = Arc::new(TestNotes::new());
    let session =
        NotesSession::with_service(Arc::clone(&service) as Arc<dyn notehub_api::NotesService>, None);

    session.start();
    settle().await;
    assert_eq!(service.list_calls().len(), 1);

    session.delete_note("6629f1b2c3d4e5f6a7b8c9d0").await.unwrap();
    settle().await;

    assert_eq!(
        service.delete_calls(),
        vec!["6629f1b2c3d4e5f6a7b8c9d0".to_string()]
    );
    assert_eq!(service.list_calls().len(), 2);
}

#[tokio::test]
async fn get_note_passes_through() {
    let service = Arc::new(TestNotes::new());
    let session = NotesSession::with_service(service, None);

    let note = session.get_note("abc123").await.unwrap();
    assert_eq!(note.id, "abc123");
}
