//! In-memory backend for view tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use cinelog_client::{ClientError, MovieBackend, Operation};
use cinelog_models::{Entry, EntryId, EntrySummary, EntryUpdate, NewEntry, Rating};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

type UpdateHook = Box<dyn Fn(&mut Entry) + Send + Sync>;

pub fn entry(id: u64, title: &str) -> Entry {
    Entry {
        id: EntryId::new(id),
        title: title.to_string(),
        genres: "SF, Drama".to_string(),
        director: String::new(),
        actors: "Amy Adams".to_string(),
        release_year: Some(2016),
        country: "USA".to_string(),
        movie_poster: None,
        rating: Some(Rating::new(4.0).unwrap()),
        impressions: "Heptapods.".to_string(),
        watch_method: "Theater".to_string(),
        watched_date: NaiveDate::from_ymd_opt(2016, 11, 20),
    }
}

#[derive(Default)]
struct State {
    entries: BTreeMap<EntryId, Entry>,
    next_id: u64,
    calls: Vec<Operation>,
    failures: HashMap<Operation, (u16, String)>,
    last_create: Option<NewEntry>,
    last_update: Option<EntryUpdate>,
}

#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
    update_hook: Option<UpdateHook>,
}

impl MemoryBackend {
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            for entry in entries {
                state.next_id = state.next_id.max(entry.id.get());
                state.entries.insert(entry.id, entry);
            }
        }
        backend
    }

    /// Applied to every updated entry before it is echoed back.
    pub fn on_update(mut self, hook: impl Fn(&mut Entry) + Send + Sync + 'static) -> Self {
        self.update_hook = Some(Box::new(hook));
        self
    }

    pub fn fail(&self, operation: Operation, status: u16, body: &str) {
        let mut state = self.state.lock().unwrap();
        state.failures.insert(operation, (status, body.to_string()));
    }

    pub fn recover(&self, operation: Operation) {
        self.state.lock().unwrap().failures.remove(&operation);
    }

    pub fn calls(&self, operation: Operation) -> usize {
        let state = self.state.lock().unwrap();
        state.calls.iter().filter(|call| **call == operation).count()
    }

    pub fn stored(&self, id: EntryId) -> Option<Entry> {
        self.state.lock().unwrap().entries.get(&id).cloned()
    }

    pub fn last_create(&self) -> Option<NewEntry> {
        self.state.lock().unwrap().last_create.clone()
    }

    pub fn last_update(&self) -> Option<EntryUpdate> {
        self.state.lock().unwrap().last_update.clone()
    }

    fn record_call(&self, operation: Operation) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation);
        match state.failures.get(&operation) {
            Some((status, body)) => Err(ClientError::status(operation, *status, body.clone())),
            None => Ok(()),
        }
    }
}

fn not_found(operation: Operation) -> ClientError {
    ClientError::status(operation, 404, r#"{"detail":"Not found."}"#)
}

fn bad_request(operation: Operation, field: &str) -> ClientError {
    ClientError::status(operation, 400, format!(r#"{{"{}":["Invalid value."]}}"#, field))
}

fn parse_year(operation: Operation, raw: Option<&str>) -> Result<Option<i32>, ClientError> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| bad_request(operation, "release_year")),
        None => Ok(None),
    }
}

fn parse_date(operation: Operation, raw: Option<&str>) -> Result<Option<NaiveDate>, ClientError> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| bad_request(operation, "watched_date")),
        None => Ok(None),
    }
}

#[async_trait]
impl MovieBackend for MemoryBackend {
    fn location(&self) -> &str {
        "memory"
    }

    async fn list_entries(&self) -> Result<Vec<EntrySummary>, ClientError> {
        self.record_call(Operation::List)?;
        let state = self.state.lock().unwrap();
        Ok(state.entries.values().map(EntrySummary::from).collect())
    }

    async fn get_entry(&self, id: EntryId) -> Result<Entry, ClientError> {
        self.record_call(Operation::Get)?;
        self.stored(id).ok_or_else(|| not_found(Operation::Get))
    }

    async fn create_entry(&self, new_entry: &NewEntry) -> Result<Entry, ClientError> {
        self.record_call(Operation::Create)?;
        let op = Operation::Create;
        let text = |key: &str| new_entry.field(key).unwrap_or_default().to_string();

        let title = text("title");
        if title.is_empty() {
            return Err(bad_request(op, "title"));
        }
        let rating = match new_entry.field("rating") {
            Some(raw) => Some(raw.parse::<Rating>().map_err(|_| bad_request(op, "rating"))?),
            None => None,
        };

        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created = Entry {
            id: EntryId::new(state.next_id),
            title,
            genres: text("genres"),
            director: text("director"),
            actors: text("actors"),
            release_year: parse_year(op, new_entry.field("release_year"))?,
            country: text("country"),
            movie_poster: new_entry
                .poster
                .as_ref()
                .map(|poster| format!("http://backend.test/media/posters/{}", poster.file_name())),
            rating,
            impressions: text("impressions"),
            watch_method: text("watch_method"),
            watched_date: parse_date(op, new_entry.field("watched_date"))?,
        };
        state.entries.insert(created.id, created.clone());
        state.last_create = Some(new_entry.clone());
        Ok(created)
    }

    async fn update_entry(&self, id: EntryId, update: &EntryUpdate) -> Result<Entry, ClientError> {
        self.record_call(Operation::Update)?;
        let op = Operation::Update;
        let existing = self.stored(id).ok_or_else(|| not_found(op))?;
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        let title = text(&update.title);
        if title.is_empty() {
            return Err(bad_request(op, "title"));
        }

        let mut updated = Entry {
            id,
            title,
            genres: text(&update.genres),
            director: text(&update.director),
            actors: text(&update.actors),
            release_year: parse_year(op, update.release_year.as_deref())?,
            country: text(&update.country),
            // the poster is not part of an update and survives it
            movie_poster: existing.movie_poster,
            rating: update.rating,
            impressions: text(&update.impressions),
            watch_method: text(&update.watch_method),
            watched_date: parse_date(op, update.watched_date.as_deref())?,
        };
        if let Some(hook) = &self.update_hook {
            hook(&mut updated);
        }

        let mut state = self.state.lock().unwrap();
        state.entries.insert(id, updated.clone());
        state.last_update = Some(update.clone());
        Ok(updated)
    }

    async fn delete_entry(&self, id: EntryId) -> Result<(), ClientError> {
        self.record_call(Operation::Delete)?;
        let mut state = self.state.lock().unwrap();
        state
            .entries
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(Operation::Delete))
    }
}
