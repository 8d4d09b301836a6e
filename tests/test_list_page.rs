//! ListPage behaviour: fetch on mount, failure handling, stale loads, selection and deletes.

mod common;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use catalog_admin::domain::model::Related;
use catalog_admin::{
    Book, BookField, CatalogClient, EntityId, EntityService, Genre, ListPage, LoadOutcome,
    LoadState, NoticeKind, ViewAction,
};
use common::{book, genre, ids, numbered_books, serve, FakeService};
use serde_json::json;
use std::num::NonZeroUsize;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn page_of<E: catalog_admin::CatalogEntity>(service: Arc<dyn EntityService<E>>) -> ListPage<E> {
    ListPage::new(service, NonZeroUsize::new(5).unwrap(), Duration::from_secs(3))
}

#[tokio::test]
async fn load_fetches_once_and_renders_first_page() {
    let service = Arc::new(FakeService::new(numbered_books(12)));
    let mut page = page_of::<Book>(service.clone());
    assert_eq!(page.load_state(), LoadState::Loading);

    assert_eq!(page.load().await, LoadOutcome::Applied { count: 12 });
    assert_eq!(page.load_state(), LoadState::Loaded);
    assert_eq!(service.calls(), vec!["list"]);

    let view = page.view();
    assert_eq!(view.total_pages, 3);
    // Default order is by id ascending.
    assert_eq!(ids(&view.items), vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn failed_load_keeps_previous_collection_and_raises_notice() {
    let service = Arc::new(FakeService::new(numbered_books(3)));
    let mut page = page_of::<Book>(service.clone());
    page.load().await;
    page.dispatch(ViewAction::SortBy(BookField::Title));

    service.fail_list.store(true, Ordering::SeqCst);
    assert_eq!(page.load().await, LoadOutcome::Failed);

    assert_eq!(page.records().len(), 3);
    assert_eq!(page.view_state().sort.field, BookField::Title);
    assert_eq!(page.load_state(), LoadState::Loaded);
    let notice = page.notices().latest().cloned().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "Catalog is down for maintenance");
}

#[tokio::test]
async fn load_arriving_after_unmount_is_discarded() {
    let service = Arc::new(FakeService::new(numbered_books(4)));
    let mut page = page_of::<Book>(service);

    let pending = page.begin_load();
    page.unmount();
    let done = pending.run().await;

    assert_eq!(page.apply_load(done), LoadOutcome::Discarded);
    assert!(page.records().is_empty());
}

#[tokio::test]
async fn superseded_load_is_discarded() {
    let service = Arc::new(FakeService::new(numbered_books(4)));
    let mut page = page_of::<Book>(service.clone());

    let older = page.begin_load();
    let newer = page.begin_load();
    let older_done = older.run().await;
    service.records.lock().unwrap().truncate(2);
    let newer_done = newer.run().await;

    assert_eq!(page.apply_load(newer_done), LoadOutcome::Applied { count: 2 });
    assert_eq!(page.apply_load(older_done), LoadOutcome::Discarded);
    assert_eq!(page.records().len(), 2);
}

#[tokio::test]
async fn select_all_follows_the_search() {
    let service = Arc::new(FakeService::new(vec![
        genre(1, "Science Fiction"),
        genre(2, "Fantasy"),
        genre(3, "Popular Science"),
    ]));
    let mut page = page_of::<Genre>(service);
    page.load().await;

    page.dispatch(ViewAction::Search("science".into()));
    assert!(page.toggle_select_all());
    assert!(page.all_selected());
    assert_eq!(page.selection().len(), 2);
    assert!(!page.selection().contains(&EntityId::from(2)));

    assert!(!page.toggle_select_all());
    assert!(page.selection().is_empty());
}

#[tokio::test]
async fn unknown_ids_cannot_be_selected() {
    let service = Arc::new(FakeService::new(numbered_books(2)));
    let mut page = page_of::<Book>(service);
    page.load().await;

    assert!(!page.toggle_selected(&EntityId::from(99)));
    assert!(page.toggle_selected(&EntityId::from(2)));
    assert!(!page.toggle_selected(&EntityId::from(2)));
    assert!(page.selection().is_empty());
}

#[tokio::test]
async fn bulk_delete_with_partial_failure() {
    let service = Arc::new(
        FakeService::new(numbered_books(8)).rejecting(7, "Book is referenced by an order"),
    );
    let mut page = page_of::<Book>(service.clone());
    page.load().await;

    page.toggle_selected(&EntityId::from(3));
    page.toggle_selected(&EntityId::from(7));
    let report = page.delete_selected().await;

    assert_eq!(report.deleted, vec![EntityId::from(3)]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id, EntityId::from(7));
    assert_eq!(report.failed[0].message, "Book is referenced by an order");

    let remaining: Vec<&EntityId> = page.records().iter().map(|b| &b.id).collect();
    assert!(!remaining.contains(&&EntityId::from(3)));
    assert!(remaining.contains(&&EntityId::from(7)));
    assert_eq!(page.records().len(), 7);

    // The failed id stays selected for a retry.
    assert_eq!(
        page.selection().ids().cloned().collect::<Vec<_>>(),
        vec![EntityId::from(7)]
    );

    let notice = page.notices().latest().cloned().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.contains("book 7"), "{}", notice.message);
    assert!(notice.message.contains("Book is referenced by an order"));

    // No re-fetch after the delete.
    assert_eq!(service.calls().iter().filter(|c| *c == "list").count(), 1);
}

#[tokio::test]
async fn single_delete_failure_leaves_collection_unchanged() {
    let service = Arc::new(FakeService::new(numbered_books(3)).rejecting(2, "Locked"));
    let mut page = page_of::<Book>(service);
    page.load().await;
    let before = page.records().to_vec();

    assert!(page.delete_one(&EntityId::from(2)).await.is_err());
    assert_eq!(page.records(), before.as_slice());
    assert_eq!(page.notices().latest().unwrap().message, "Locked");

    page.delete_one(&EntityId::from(1)).await.unwrap();
    assert_eq!(page.records().len(), 2);
    assert_eq!(page.notices().latest().unwrap().kind, NoticeKind::Success);
}

#[tokio::test]
async fn deleting_the_last_page_moves_back() {
    let service = Arc::new(FakeService::new(numbered_books(6)));
    let mut page = page_of::<Book>(service);
    page.load().await;
    page.dispatch(ViewAction::GoToPage(2));
    assert_eq!(page.view_state().page, 2);

    page.delete_one(&EntityId::from(6)).await.unwrap();
    assert_eq!(page.view_state().page, 1);
    assert_eq!(page.view().total_pages, 1);
}

#[tokio::test]
async fn saved_record_replaces_its_row() {
    let service = Arc::new(FakeService::new(numbered_books(2)));
    let mut page = page_of::<Book>(service);
    page.load().await;

    let mut edited = book(2, "Renamed");
    edited.author = Some(Related::Name("Someone".into()));
    page.apply_saved(edited.clone());

    assert_eq!(page.records().len(), 2);
    assert!(page.records().contains(&edited));
}

// --- Same flow against the HTTP client and an in-process catalog stub ---

#[derive(Clone, Default)]
struct StubState {
    deleted: Arc<Mutex<Vec<String>>>,
}

async fn list_books() -> Json<serde_json::Value> {
    let books: Vec<_> = (1..=8)
        .map(|i| json!({ "id": i, "title": format!("Title {}", i), "price": i * 10 }))
        .collect();
    Json(json!(books))
}

async fn delete_book(
    State(state): State<StubState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    if id == "7" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Book 7 has open orders" })),
        );
    }
    state.deleted.lock().unwrap().push(id);
    (StatusCode::OK, Json(json!({ "message": "deleted" })))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn bulk_delete_over_http() -> Result<(), Box<dyn std::error::Error>> {
    let state = StubState::default();
    let router = Router::new()
        .route("/books", get(list_books))
        .route("/book/:id", delete(delete_book))
        .with_state(state.clone());
    let (base_url, server) = serve(router).await;

    let client: Arc<dyn EntityService<Book>> = Arc::new(CatalogClient::new(base_url)?);
    let mut page = page_of::<Book>(client);
    assert_eq!(page.load().await, LoadOutcome::Applied { count: 8 });

    page.toggle_selected(&EntityId::from(3));
    page.toggle_selected(&EntityId::from(7));
    let report = page.delete_selected().await;

    assert_eq!(report.deleted, vec![EntityId::from(3)]);
    assert_eq!(report.failed[0].id, EntityId::from(7));
    assert_eq!(report.failed[0].message, "Book 7 has open orders");
    assert_eq!(*state.deleted.lock().unwrap(), vec!["3".to_string()]);
    assert_eq!(page.records().len(), 7);
    assert!(page.records().iter().any(|b| b.id == EntityId::from(7)));

    server.abort();
    Ok(())
}
