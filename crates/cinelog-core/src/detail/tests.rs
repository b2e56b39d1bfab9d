use super::*;
use crate::testing::{entry, MemoryBackend};
use cinelog_client::Operation;

async fn loaded(backend: &MemoryBackend, id: u64) -> DetailView {
    let mut view = DetailView::mount(EntryId::new(id));
    view.load(backend).await;
    view
}

#[tokio::test]
async fn test_load_enters_read_mode() {
    let backend = MemoryBackend::with_entries(vec![entry(1, "Arrival")]);
    let view = loaded(&backend, 1).await;

    assert_eq!(view.phase(), &DetailPhase::Reading(entry(1, "Arrival")));
    assert_eq!(view.entry().map(|e| e.title.as_str()), Some("Arrival"));
    assert!(view.draft().is_none());
    assert!(!view.is_busy());
}

#[tokio::test]
async fn test_missing_entry_is_not_found() {
    let backend = MemoryBackend::default();
    let view = loaded(&backend, 99).await;

    assert_eq!(view.phase(), &DetailPhase::Failed("Movie not found.".to_string()));
    assert!(view.entry().is_none());
}

#[tokio::test]
async fn test_fetch_failure_is_terminal() {
    let backend = MemoryBackend::with_entries(vec![entry(1, "Arrival")]);
    backend.fail(Operation::Get, 503, "");

    let mut view = loaded(&backend, 1).await;
    assert_eq!(
        view.phase(),
        &DetailPhase::Failed("Failed to load the movie (HTTP 503)".to_string())
    );

    backend.recover(Operation::Get);
    view.load(&backend).await;
    assert!(matches!(view.phase(), DetailPhase::Failed(_)));
    assert!(view.begin_edit().is_err());
    assert_eq!(backend.calls(Operation::Get), 1);
}

#[tokio::test]
async fn test_cancel_leaves_authoritative_copy_untouched() {
    let backend = MemoryBackend::with_entries(vec![entry(1, "Arrival")]);
    let mut view = loaded(&backend, 1).await;
    let before = view.entry().cloned().unwrap();

    view.begin_edit().unwrap();
    view.update_field(EntryField::Title, "Story of Your Life").unwrap();
    view.update_field(EntryField::ReleaseYear, "1998").unwrap();
    view.update_field(EntryField::Impressions, "").unwrap();
    view.set_rating(None).unwrap();
    assert_eq!(view.entry(), Some(&before));
    assert_eq!(view.unsaved_changes().len(), 4);

    view.cancel_edit().unwrap();
    assert_eq!(view.phase(), &DetailPhase::Reading(before));
    assert_eq!(backend.calls(Operation::Update), 0);
}

#[tokio::test]
async fn test_new_edit_discards_earlier_unsaved_changes() {
    let backend = MemoryBackend::with_entries(vec![entry(1, "Arrival")]);
    let mut view = loaded(&backend, 1).await;

    view.begin_edit().unwrap();
    view.update_field(EntryField::Country, "Canada").unwrap();
    view.cancel_edit().unwrap();

    view.begin_edit().unwrap();
    assert_eq!(view.draft().unwrap().country.as_deref(), Some("USA"));
    assert!(view.unsaved_changes().is_empty());
}

#[tokio::test]
async fn test_save_sends_full_draft_and_adopts_echo() {
    // backend normalizes text, touching fields the user never edited
    let backend = MemoryBackend::with_entries(vec![entry(1, "Arrival")]).on_update(|saved| {
        saved.country = saved.country.to_uppercase();
        saved.genres = saved.genres.replace(", ", ",");
    });
    let mut view = loaded(&backend, 1).await;

    view.begin_edit().unwrap();
    view.update_field(EntryField::Director, "Denis Villeneuve").unwrap();
    view.update_field(EntryField::Rating, "3.5").unwrap();
    view.save(&backend).await.unwrap();

    let sent = backend.last_update().unwrap();
    assert_eq!(sent.title.as_deref(), Some("Arrival"));
    assert_eq!(sent.director.as_deref(), Some("Denis Villeneuve"));
    assert_eq!(sent.release_year.as_deref(), Some("2016"));

    let shown = view.entry().unwrap().clone();
    assert_eq!(view.phase(), &DetailPhase::Reading(shown.clone()));
    assert_eq!(Some(&shown), backend.stored(EntryId::new(1)).as_ref());
    assert_eq!(shown.country, "USA");
    assert_eq!(shown.genres, "SF,Drama");
    assert_eq!(shown.rating, Some(Rating::new(3.5).unwrap()));
    assert!(view.error().is_none());
}

#[tokio::test]
async fn test_save_never_sends_the_poster() {
    let mut with_poster = entry(1, "Arrival");
    with_poster.movie_poster = Some("http://backend.test/media/posters/arrival.jpg".to_string());
    let backend = MemoryBackend::with_entries(vec![with_poster.clone()]);
    let mut view = loaded(&backend, 1).await;

    view.begin_edit().unwrap();
    let update = view.begin_save().unwrap();
    let body = serde_json::to_value(&update).unwrap();
    assert!(body.get("movie_poster").is_none());
    assert!(body.get("id").is_none());

    view.complete_save(backend.update_entry(view.id(), &update).await);
    assert_eq!(view.entry().unwrap().movie_poster, with_poster.movie_poster);
}

#[tokio::test]
async fn test_save_failure_keeps_draft() {
    let backend = MemoryBackend::with_entries(vec![entry(1, "Arrival")]);
    let mut view = loaded(&backend, 1).await;

    view.begin_edit().unwrap();
    view.update_field(EntryField::ReleaseYear, "next year").unwrap();
    view.save(&backend).await.unwrap();

    assert!(view.error().unwrap().contains("release_year"));
    assert!(matches!(view.phase(), DetailPhase::Editing { .. }));
    assert_eq!(view.draft().unwrap().release_year.as_deref(), Some("next year"));
    assert_eq!(view.entry(), Some(&entry(1, "Arrival")));

    view.update_field(EntryField::ReleaseYear, "2016").unwrap();
    view.save(&backend).await.unwrap();
    assert!(view.error().is_none());
    assert!(matches!(view.phase(), DetailPhase::Reading(_)));
}

#[tokio::test]
async fn test_save_rejected_while_saving() {
    let backend = MemoryBackend::with_entries(vec![entry(1, "Arrival")]);
    let mut view = loaded(&backend, 1).await;

    view.begin_edit().unwrap();
    view.begin_save().unwrap();
    assert!(view.is_busy());
    assert_eq!(view.begin_save(), Err(ViewError::transition("save", "saving")));
    assert!(view.update_field(EntryField::Title, "Dune").is_err());
    assert!(matches!(view.phase(), DetailPhase::Saving { .. }));
}

#[tokio::test]
async fn test_null_rating_round_trips_as_absent() {
    let backend = MemoryBackend::with_entries(vec![entry(1, "Arrival")]);
    let mut view = loaded(&backend, 1).await;

    view.begin_edit().unwrap();
    view.set_rating(None).unwrap();
    view.save(&backend).await.unwrap();

    assert_eq!(view.entry().unwrap().rating, None);
    let body = serde_json::to_value(backend.last_update().unwrap()).unwrap();
    assert!(body["rating"].is_null());
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let backend = MemoryBackend::with_entries(vec![entry(1, "Arrival")]);
    let mut view = loaded(&backend, 1).await;

    assert_eq!(
        view.delete(&backend).await,
        Err(ViewError::transition("confirm delete", "reading"))
    );
    assert_eq!(backend.calls(Operation::Delete), 0);

    view.request_delete().unwrap();
    view.dismiss_delete().unwrap();
    assert!(view.confirm_delete().is_err());
    assert_eq!(backend.calls(Operation::Delete), 0);

    view.request_delete().unwrap();
    let route = view.delete(&backend).await.unwrap();
    assert_eq!(route, Some(Route::List));
    assert_eq!(view.phase(), &DetailPhase::Deleted);
    assert_eq!(backend.calls(Operation::Delete), 1);
    assert!(backend.stored(EntryId::new(1)).is_none());
}

#[tokio::test]
async fn test_delete_failure_returns_to_read_mode() {
    let backend = MemoryBackend::with_entries(vec![entry(1, "Arrival")]);
    backend.fail(Operation::Delete, 500, "server error");
    let mut view = loaded(&backend, 1).await;

    view.request_delete().unwrap();
    let route = view.delete(&backend).await.unwrap();

    assert_eq!(route, None);
    assert_eq!(view.phase(), &DetailPhase::Reading(entry(1, "Arrival")));
    assert_eq!(
        view.error(),
        Some("Failed to delete the movie (HTTP 500): server error")
    );
}

#[test]
fn test_delete_not_offered_while_editing() {
    let mut view = DetailView::mount(EntryId::new(1));
    view.complete_load(Ok(entry(1, "Arrival")));
    view.begin_edit().unwrap();

    assert_eq!(
        view.request_delete(),
        Err(ViewError::transition("delete", "editing"))
    );
    assert!(matches!(view.phase(), DetailPhase::Editing { .. }));
}

#[test]
fn test_stale_responses_discarded() {
    let mut view = DetailView::mount(EntryId::new(1));
    view.complete_load(Ok(entry(1, "Arrival")));

    view.complete_load(Ok(entry(1, "Something else")));
    view.complete_save(Ok(entry(1, "Something else")));
    assert_eq!(view.complete_delete(Ok(())), None);

    assert_eq!(view.phase(), &DetailPhase::Reading(entry(1, "Arrival")));
}
