use crate::entry::{Entry, EntryId};
use crate::error::ModelError;
use crate::rating::Rating;
use std::fmt;
use std::str::FromStr;

/// Editable fields of an entry, named by their wire keys.
///
/// The identifier and the poster are deliberately absent: the id is owned by
/// the backend and the poster only travels as a staged upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Title,
    Genres,
    Director,
    Actors,
    ReleaseYear,
    Country,
    WatchedDate,
    WatchMethod,
    Rating,
    Impressions,
}

impl EntryField {
    /// Form order.
    pub const ALL: [EntryField; 10] = [
        EntryField::Title,
        EntryField::Genres,
        EntryField::Director,
        EntryField::Actors,
        EntryField::ReleaseYear,
        EntryField::Country,
        EntryField::WatchedDate,
        EntryField::WatchMethod,
        EntryField::Rating,
        EntryField::Impressions,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            EntryField::Title => "title",
            EntryField::Genres => "genres",
            EntryField::Director => "director",
            EntryField::Actors => "actors",
            EntryField::ReleaseYear => "release_year",
            EntryField::Country => "country",
            EntryField::WatchedDate => "watched_date",
            EntryField::WatchMethod => "watch_method",
            EntryField::Rating => "rating",
            EntryField::Impressions => "impressions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryField::Title => "Title",
            EntryField::Genres => "Genres (comma separated)",
            EntryField::Director => "Director",
            EntryField::Actors => "Actors (comma separated)",
            EntryField::ReleaseYear => "Release year",
            EntryField::Country => "Country",
            EntryField::WatchedDate => "Watched on (YYYY-MM-DD)",
            EntryField::WatchMethod => "Watch method",
            EntryField::Rating => "Rating (0-5, half stars allowed)",
            EntryField::Impressions => "Impressions",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for EntryField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        EntryField::ALL
            .into_iter()
            .find(|field| field.wire_name() == normalized)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

/// Client-local edit buffer: a partial projection of [`Entry`].
///
/// Every field is optional and text is kept exactly as typed (the release
/// year included); the backend coerces and validates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub id: Option<EntryId>,
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

impl EntryDraft {
    /// Fresh record form: empty text, rating on the middle star.
    pub fn blank() -> Self {
        let empty = || Some(String::new());
        Self {
            id: None,
            title: empty(),
            genres: empty(),
            director: empty(),
            actors: empty(),
            release_year: empty(),
            country: empty(),
            watched_date: empty(),
            watch_method: empty(),
            rating: Some(Rating::MIDDLE_STAR),
            impressions: empty(),
        }
    }

    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id),
            title: Some(entry.title.clone()),
            genres: Some(entry.genres.clone()),
            director: Some(entry.director.clone()),
            actors: Some(entry.actors.clone()),
            release_year: Some(
                entry
                    .release_year
                    .map(|year| year.to_string())
                    .unwrap_or_default(),
            ),
            country: Some(entry.country.clone()),
            watched_date: Some(
                entry
                    .watched_date
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            watch_method: Some(entry.watch_method.clone()),
            rating: entry.rating,
            impressions: Some(entry.impressions.clone()),
        }
    }

    /// Update one field by key. Rating text is parsed; empty text clears it.
    pub fn set(&mut self, field: EntryField, raw: &str) -> Result<(), ModelError> {
        if field == EntryField::Rating {
            let rating = if raw.trim().is_empty() {
                None
            } else {
                Some(raw.parse()?)
            };
            self.rating = rating;
            return Ok(());
        }
        if let Some(slot) = self.text_slot_mut(field) {
            *slot = Some(raw.to_string());
        }
        Ok(())
    }

    pub fn set_rating(&mut self, rating: Option<Rating>) {
        self.rating = rating;
    }

    /// Current value as text, as a form would show it.
    pub fn get(&self, field: EntryField) -> Option<String> {
        match field {
            EntryField::Rating => self.rating.map(|rating| rating.to_string()),
            _ => self.text_slot(field).cloned().flatten(),
        }
    }

    /// Multipart form pairs: every field that is neither null nor empty.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        EntryField::ALL
            .into_iter()
            .filter_map(|field| {
                self.get(field)
                    .filter(|value| !value.is_empty())
                    .map(|value| (field.wire_name(), value))
            })
            .collect()
    }

    fn text_slot(&self, field: EntryField) -> Option<&Option<String>> {
        match field {
            EntryField::Title => Some(&self.title),
            EntryField::Genres => Some(&self.genres),
            EntryField::Director => Some(&self.director),
            EntryField::Actors => Some(&self.actors),
            EntryField::ReleaseYear => Some(&self.release_year),
            EntryField::Country => Some(&self.country),
            EntryField::WatchedDate => Some(&self.watched_date),
            EntryField::WatchMethod => Some(&self.watch_method),
            EntryField::Impressions => Some(&self.impressions),
            EntryField::Rating => None,
        }
    }

    fn text_slot_mut(&mut self, field: EntryField) -> Option<&mut Option<String>> {
        match field {
            EntryField::Title => Some(&mut self.title),
            EntryField::Genres => Some(&mut self.genres),
            EntryField::Director => Some(&mut self.director),
            EntryField::Actors => Some(&mut self.actors),
            EntryField::ReleaseYear => Some(&mut self.release_year),
            EntryField::Country => Some(&mut self.country),
            EntryField::WatchedDate => Some(&mut self.watched_date),
            EntryField::WatchMethod => Some(&mut self.watch_method),
            EntryField::Impressions => Some(&mut self.impressions),
            EntryField::Rating => None,
        }
    }
}
