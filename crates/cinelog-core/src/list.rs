use crate::route::Route;
use cinelog_client::{ClientError, MovieBackend};
use cinelog_models::EntrySummary;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Failed(String),
    Loaded(Vec<EntrySummary>),
}

/// The collection screen. One fetch per mount; a failure stays until the
/// view is mounted again.
#[derive(Debug)]
pub struct ListView {
    state: ListState,
}

impl ListView {
    pub fn mount() -> Self {
        Self {
            state: ListState::Loading,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading)
    }

    /// Loaded with zero entries: show the empty-state message, not an error.
    pub fn is_empty_state(&self) -> bool {
        matches!(&self.state, ListState::Loaded(entries) if entries.is_empty())
    }

    pub fn entries(&self) -> &[EntrySummary] {
        match &self.state {
            ListState::Loaded(entries) => entries,
            _ => &[],
        }
    }

    /// Detail route for the entry at `index` in the loaded list.
    pub fn route_to(&self, index: usize) -> Option<Route> {
        self.entries().get(index).map(|entry| Route::Detail(entry.id))
    }

    pub fn complete_load(&mut self, result: Result<Vec<EntrySummary>, ClientError>) {
        if !self.is_loading() {
            debug!("Discarding list response for a settled view");
            return;
        }

        self.state = match result {
            Ok(entries) => {
                info!("Loaded {} entries", entries.len());
                ListState::Loaded(entries)
            }
            Err(e) => ListState::Failed(e.to_string()),
        };
    }

    pub async fn load(&mut self, backend: &dyn MovieBackend) {
        if !self.is_loading() {
            return;
        }
        debug!("Fetching entries from {}", backend.location());
        let result = backend.list_entries().await;
        self.complete_load(result);
    }
}
