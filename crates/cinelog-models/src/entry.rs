use crate::error::ModelError;
use crate::rating::Rating;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier of a logged entry. Never edited by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(EntryId)
            .map_err(|_| ModelError::InvalidId(s.to_string()))
    }
}

/// A movie or drama record as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: String, // comma separated
    #[serde(default, deserialize_with = "null_as_empty")]
    pub director: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub actors: String, // comma separated
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,
    #[serde(default)]
    pub movie_poster: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub impressions: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub watch_method: String,
    #[serde(default)]
    pub watched_date: Option<NaiveDate>,
}

impl Entry {
    pub fn genre_list(&self) -> Vec<&str> {
        split_list(&self.genres)
    }

    pub fn actor_list(&self) -> Vec<&str> {
        split_list(&self.actors)
    }

    /// Poster reference, or `placeholder` when the entry has none.
    pub fn poster_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        poster_or(self.movie_poster.as_deref(), placeholder)
    }
}

/// The list endpoint's per-entry shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySummary {
    pub id: EntryId,
    pub title: String,
    #[serde(default)]
    pub movie_poster: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub watched_date: Option<NaiveDate>,
}

impl EntrySummary {
    pub fn poster_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        poster_or(self.movie_poster.as_deref(), placeholder)
    }
}

impl From<&Entry> for EntrySummary {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            movie_poster: entry.movie_poster.clone(),
            rating: entry.rating,
            watched_date: entry.watched_date,
        }
    }
}

/// Split a comma separated free-text field into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

fn poster_or<'a>(poster: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match poster {
        Some(url) if !url.trim().is_empty() => url,
        _ => placeholder,
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
