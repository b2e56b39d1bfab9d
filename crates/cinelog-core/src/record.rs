use crate::error::ViewError;
use crate::route::Route;
use cinelog_client::{ClientError, MovieBackend};
use cinelog_models::{Entry, EntryDraft, EntryField, NewEntry, Rating, StagedPoster};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordPhase {
    Drafting,
    Submitting,
    /// The backend's copy of the created entry.
    Submitted(Entry),
}

impl RecordPhase {
    fn name(&self) -> &'static str {
        match self {
            RecordPhase::Drafting => "drafting",
            RecordPhase::Submitting => "submitting",
            RecordPhase::Submitted(_) => "submitted",
        }
    }
}

/// The create screen: a blank draft plus at most one staged poster.
#[derive(Debug)]
pub struct RecordView {
    draft: EntryDraft,
    poster: Option<StagedPoster>,
    phase: RecordPhase,
    error: Option<String>,
}

impl Default for RecordView {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordView {
    pub fn new() -> Self {
        Self {
            draft: EntryDraft::blank(),
            poster: None,
            phase: RecordPhase::Drafting,
            error: None,
        }
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn poster(&self) -> Option<&StagedPoster> {
        self.poster.as_ref()
    }

    pub fn phase(&self) -> &RecordPhase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, RecordPhase::Submitting)
    }

    pub fn update_field(&mut self, field: EntryField, raw: &str) -> Result<(), ViewError> {
        self.ensure_drafting("edit the record")?;
        self.draft.set(field, raw)?;
        Ok(())
    }

    pub fn set_rating(&mut self, rating: Option<Rating>) -> Result<(), ViewError> {
        self.ensure_drafting("rate the record")?;
        self.draft.set_rating(rating);
        Ok(())
    }

    /// Stage an image, replacing any previously staged one.
    pub fn attach_poster(&mut self, poster: StagedPoster) -> Result<(), ViewError> {
        self.ensure_drafting("attach a poster")?;
        if let Some(previous) = self.poster.replace(poster) {
            debug!("Replaced staged poster {}", previous.file_name());
        }
        Ok(())
    }

    pub fn clear_poster(&mut self) -> Result<(), ViewError> {
        self.ensure_drafting("remove the poster")?;
        self.poster = None;
        Ok(())
    }

    /// Enter the submitting phase and build the multipart payload.
    pub fn begin_submit(&mut self) -> Result<NewEntry, ViewError> {
        self.ensure_drafting("submit")?;
        self.phase = RecordPhase::Submitting;
        self.error = None;
        Ok(NewEntry::from_draft(&self.draft, self.poster.as_ref()))
    }

    /// Apply the create response. Success discards the local draft and
    /// routes to the list; failure keeps everything for a retry.
    pub fn complete_submit(&mut self, result: Result<Entry, ClientError>) -> Option<Route> {
        if !self.is_submitting() {
            debug!("Discarding create response while {}", self.phase.name());
            return None;
        }

        match result {
            Ok(created) => {
                info!("Recorded '{}' as entry {}", created.title, created.id);
                self.draft = EntryDraft::blank();
                self.poster = None;
                self.phase = RecordPhase::Submitted(created);
                Some(Route::List)
            }
            Err(e) => {
                self.phase = RecordPhase::Drafting;
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub async fn submit(&mut self, backend: &dyn MovieBackend) -> Result<Option<Route>, ViewError> {
        let payload = self.begin_submit()?;
        let result = backend.create_entry(&payload).await;
        Ok(self.complete_submit(result))
    }

    fn ensure_drafting(&self, action: &'static str) -> Result<(), ViewError> {
        match self.phase {
            RecordPhase::Drafting => Ok(()),
            ref other => Err(ViewError::transition(action, other.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryBackend;
    use cinelog_client::Operation;

    fn poster(name: &str) -> StagedPoster {
        StagedPoster::new(name, vec![0xff, 0xd8, 0xff], format!("file:///tmp/{}", name)).unwrap()
    }

    #[tokio::test]
    async fn test_title_only_submission() {
        let backend = MemoryBackend::default();
        let mut view = RecordView::new();
        view.update_field(EntryField::Title, "Arrival").unwrap();
        view.set_rating(None).unwrap();

        let route = view.submit(&backend).await.unwrap();
        assert_eq!(route, Some(Route::List));

        let sent = backend.last_create().unwrap();
        assert_eq!(sent.fields, vec![("title", "Arrival".to_string())]);
        assert!(sent.poster.is_none());

        match view.phase() {
            RecordPhase::Submitted(created) => {
                assert_eq!(created.title, "Arrival");
                assert_eq!(created.rating, None);
                assert_eq!(Some(created), backend.stored(created.id).as_ref());
            }
            other => panic!("unexpected phase: {other:?}"),
        }
        // local state discarded
        assert_eq!(view.draft(), &EntryDraft::blank());
    }

    #[tokio::test]
    async fn test_created_entry_matches_fetch() {
        let backend = MemoryBackend::default();
        let mut view = RecordView::new();
        view.update_field(EntryField::Title, "Arrival").unwrap();
        view.update_field(EntryField::Genres, "SF, Drama").unwrap();
        view.update_field(EntryField::ReleaseYear, "2016").unwrap();
        view.update_field(EntryField::WatchedDate, "2016-11-20").unwrap();
        view.update_field(EntryField::Rating, "3.5").unwrap();
        view.attach_poster(poster("arrival.jpg")).unwrap();

        view.submit(&backend).await.unwrap();
        let created = match view.phase() {
            RecordPhase::Submitted(created) => created.clone(),
            other => panic!("unexpected phase: {other:?}"),
        };

        let fetched = backend.get_entry(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.release_year, Some(2016));
        assert_eq!(fetched.rating, Some(Rating::new(3.5).unwrap()));
        assert!(fetched.movie_poster.unwrap().ends_with("arrival.jpg"));
    }

    #[test]
    fn test_new_poster_replaces_staged_one() {
        let mut view = RecordView::new();
        view.attach_poster(poster("first.jpg")).unwrap();
        view.attach_poster(poster("second.jpg")).unwrap();
        assert_eq!(view.poster().unwrap().file_name(), "second.jpg");

        view.update_field(EntryField::Title, "Arrival").unwrap();
        let payload = view.begin_submit().unwrap();
        assert_eq!(payload.poster.unwrap().file_name(), "second.jpg");
    }

    #[tokio::test]
    async fn test_failure_keeps_draft_for_retry() {
        let backend = MemoryBackend::default();
        backend.fail(Operation::Create, 400, r#"{"title":["This field is required."]}"#);

        let mut view = RecordView::new();
        view.update_field(EntryField::Title, "Arrival").unwrap();
        view.update_field(EntryField::Director, "Denis Villeneuve").unwrap();
        view.attach_poster(poster("arrival.png")).unwrap();
        let before = view.draft().clone();

        let route = view.submit(&backend).await.unwrap();
        assert_eq!(route, None);
        assert_eq!(view.phase(), &RecordPhase::Drafting);
        assert_eq!(view.draft(), &before);
        assert!(view.poster().is_some());
        assert!(view.error().unwrap().contains("This field is required."));

        backend.recover(Operation::Create);
        assert_eq!(view.submit(&backend).await.unwrap(), Some(Route::List));
        assert!(view.error().is_none());
    }

    #[test]
    fn test_no_second_submit_in_flight() {
        let mut view = RecordView::new();
        view.update_field(EntryField::Title, "Arrival").unwrap();
        view.begin_submit().unwrap();

        assert_eq!(
            view.begin_submit(),
            Err(ViewError::transition("submit", "submitting"))
        );
        assert!(view.update_field(EntryField::Title, "Dune").is_err());
    }

    #[test]
    fn test_late_response_discarded() {
        let mut view = RecordView::new();
        let route = view.complete_submit(Err(ClientError::status(Operation::Create, 500, "")));
        assert_eq!(route, None);
        assert!(view.error().is_none());
    }

    #[test]
    fn test_bad_rating_text_rejected() {
        let mut view = RecordView::new();
        assert!(matches!(
            view.update_field(EntryField::Rating, "4.2"),
            Err(ViewError::Field(_))
        ));
        assert_eq!(view.draft().rating, Some(Rating::MIDDLE_STAR));
    }
}
