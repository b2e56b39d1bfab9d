use crate::draft::{EntryDraft, EntryField};
use crate::poster::StagedPoster;
use crate::rating::Rating;
use serde::Serialize;

/// Body of a create request: multipart text pairs plus an optional image.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub fields: Vec<(&'static str, String)>,
    pub poster: Option<StagedPoster>,
}

impl NewEntry {
    /// Multipart key the staged image is sent under.
    pub const POSTER_KEY: &'static str = "movie_poster";

    pub fn from_draft(draft: &EntryDraft, poster: Option<&StagedPoster>) -> Self {
        Self {
            fields: draft.form_fields(),
            poster: poster.cloned(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// JSON body of an update request: the whole draft.
///
/// Neither the identifier (it is in the path) nor the poster is part of this
/// type. Edits never re-upload an image; changing a poster means recording
/// the entry again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryUpdate {
    pub title: Option<String>,
    pub genres: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub release_year: Option<String>,
    pub country: Option<String>,
    pub watched_date: Option<String>,
    pub watch_method: Option<String>,
    pub rating: Option<Rating>,
    pub impressions: Option<String>,
}

impl From<&EntryDraft> for EntryUpdate {
    fn from(draft: &EntryDraft) -> Self {
        // Nullable columns take null rather than an empty string
        let nullable = |field: EntryField| draft.get(field).filter(|value| !value.trim().is_empty());
        Self {
            title: draft.title.clone(),
            genres: draft.genres.clone(),
            director: draft.director.clone(),
            actors: draft.actors.clone(),
            release_year: nullable(EntryField::ReleaseYear),
            country: draft.country.clone(),
            watched_date: nullable(EntryField::WatchedDate),
            watch_method: draft.watch_method.clone(),
            rating: draft.rating,
            impressions: draft.impressions.clone(),
        }
    }
}
