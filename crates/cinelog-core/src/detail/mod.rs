//! Detail screen: read mode, draft editing, save and guarded delete.
//!
//! Every phase that shows an entry carries the authoritative copy by value.
//! A draft exists only while editing or saving and is discarded or replaced
//! wholesale; the authoritative copy changes only when a server response
//! arrives.

use crate::error::ViewError;
use crate::reconcile;
use crate::route::Route;
use cinelog_client::{ClientError, MovieBackend};
use cinelog_models::{Entry, EntryDraft, EntryField, EntryId, EntryUpdate, Rating};
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

const NOT_FOUND_MESSAGE: &str = "Movie not found.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    Loading,
    /// The fetch failed; terminal for this mount.
    Failed(String),
    Reading(Entry),
    Editing { current: Entry, draft: EntryDraft },
    Saving { current: Entry, draft: EntryDraft },
    ConfirmingDelete(Entry),
    Deleting(Entry),
    Deleted,
}

impl DetailPhase {
    pub fn name(&self) -> &'static str {
        match self {
            DetailPhase::Loading => "loading",
            DetailPhase::Failed(_) => "failed",
            DetailPhase::Reading(_) => "reading",
            DetailPhase::Editing { .. } => "editing",
            DetailPhase::Saving { .. } => "saving",
            DetailPhase::ConfirmingDelete(_) => "confirming delete",
            DetailPhase::Deleting(_) => "deleting",
            DetailPhase::Deleted => "deleted",
        }
    }
}

#[derive(Debug)]
pub struct DetailView {
    id: EntryId,
    phase: DetailPhase,
    error: Option<String>,
}

impl DetailView {
    pub fn mount(id: EntryId) -> Self {
        Self {
            id,
            phase: DetailPhase::Loading,
            error: None,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    /// Message from the last failed save or delete.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The last server-confirmed copy, in any phase that has one.
    pub fn entry(&self) -> Option<&Entry> {
        match &self.phase {
            DetailPhase::Reading(entry)
            | DetailPhase::ConfirmingDelete(entry)
            | DetailPhase::Deleting(entry)
            | DetailPhase::Editing { current: entry, .. }
            | DetailPhase::Saving { current: entry, .. } => Some(entry),
            DetailPhase::Loading | DetailPhase::Failed(_) | DetailPhase::Deleted => None,
        }
    }

    pub fn draft(&self) -> Option<&EntryDraft> {
        match &self.phase {
            DetailPhase::Editing { draft, .. } | DetailPhase::Saving { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// A request is in flight; triggering controls stay disabled.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            DetailPhase::Loading | DetailPhase::Saving { .. } | DetailPhase::Deleting(_)
        )
    }

    /// Fields the draft has changed relative to the authoritative copy.
    pub fn unsaved_changes(&self) -> Vec<EntryField> {
        match &self.phase {
            DetailPhase::Editing { current, draft } | DetailPhase::Saving { current, draft } => {
                reconcile::changed_fields(current, draft)
            }
            _ => Vec::new(),
        }
    }

    pub fn complete_load(&mut self, result: Result<Entry, ClientError>) {
        if !matches!(self.phase, DetailPhase::Loading) {
            debug!("Discarding fetch response for entry {} while {}", self.id, self.phase.name());
            return;
        }

        self.phase = match result {
            Ok(entry) => DetailPhase::Reading(entry),
            Err(e) if e.is_not_found() => DetailPhase::Failed(NOT_FOUND_MESSAGE.to_string()),
            Err(e) => DetailPhase::Failed(e.to_string()),
        };
    }

    pub async fn load(&mut self, backend: &dyn MovieBackend) {
        if !matches!(self.phase, DetailPhase::Loading) {
            return;
        }
        debug!("Fetching entry {} from {}", self.id, backend.location());
        let result = backend.get_entry(self.id).await;
        self.complete_load(result);
    }

    /// Start editing from a fresh copy of the authoritative entry.
    pub fn begin_edit(&mut self) -> Result<(), ViewError> {
        match self.take_phase() {
            DetailPhase::Reading(current) => {
                let draft = reconcile::draft_from(&current);
                self.phase = DetailPhase::Editing { current, draft };
                self.error = None;
                Ok(())
            }
            other => self.reject("edit", other),
        }
    }

    pub fn update_field(&mut self, field: EntryField, raw: &str) -> Result<(), ViewError> {
        match &mut self.phase {
            DetailPhase::Editing { draft, .. } => Ok(draft.set(field, raw)?),
            other => Err(ViewError::transition("change a field", other.name())),
        }
    }

    pub fn set_rating(&mut self, rating: Option<Rating>) -> Result<(), ViewError> {
        match &mut self.phase {
            DetailPhase::Editing { draft, .. } => {
                draft.set_rating(rating);
                Ok(())
            }
            other => Err(ViewError::transition("change the rating", other.name())),
        }
    }

    /// Drop the draft without a request.
    pub fn cancel_edit(&mut self) -> Result<(), ViewError> {
        match self.take_phase() {
            DetailPhase::Editing { current, .. } => {
                self.phase = DetailPhase::Reading(current);
                Ok(())
            }
            other => self.reject("cancel editing", other),
        }
    }

    /// Enter the saving phase and build the update body from the whole draft.
    pub fn begin_save(&mut self) -> Result<EntryUpdate, ViewError> {
        match self.take_phase() {
            DetailPhase::Editing { current, draft } => {
                let update = EntryUpdate::from(&draft);
                self.phase = DetailPhase::Saving { current, draft };
                self.error = None;
                Ok(update)
            }
            other => self.reject("save", other),
        }
    }

    /// Apply the update response: the echoed entry replaces the authoritative
    /// copy in full; on failure the draft is kept for another attempt.
    pub fn complete_save(&mut self, result: Result<Entry, ClientError>) {
        match self.take_phase() {
            DetailPhase::Saving { current, draft } => match result {
                Ok(saved) => {
                    info!("Saved entry {}", saved.id);
                    let snapshots = reconcile::accept(saved);
                    debug!("Draft resynced to {} fields", snapshots.draft.form_fields().len());
                    self.phase = DetailPhase::Reading(snapshots.authoritative);
                }
                Err(e) => {
                    warn!("Saving entry {} failed: {}", self.id, e);
                    self.error = Some(e.to_string());
                    self.phase = DetailPhase::Editing { current, draft };
                }
            },
            other => {
                debug!("Discarding save response for entry {} while {}", self.id, other.name());
                self.phase = other;
            }
        }
    }

    pub async fn save(&mut self, backend: &dyn MovieBackend) -> Result<(), ViewError> {
        let update = self.begin_save()?;
        let result = backend.update_entry(self.id, &update).await;
        self.complete_save(result);
        Ok(())
    }

    /// First step of a delete: open the confirmation.
    pub fn request_delete(&mut self) -> Result<(), ViewError> {
        match self.take_phase() {
            DetailPhase::Reading(entry) => {
                self.phase = DetailPhase::ConfirmingDelete(entry);
                Ok(())
            }
            other => self.reject("delete", other),
        }
    }

    pub fn dismiss_delete(&mut self) -> Result<(), ViewError> {
        match self.take_phase() {
            DetailPhase::ConfirmingDelete(entry) => {
                self.phase = DetailPhase::Reading(entry);
                Ok(())
            }
            other => self.reject("dismiss the confirmation", other),
        }
    }

    /// Second step: close the confirmation and hand out the id to delete.
    pub fn confirm_delete(&mut self) -> Result<EntryId, ViewError> {
        match self.take_phase() {
            DetailPhase::ConfirmingDelete(entry) => {
                self.phase = DetailPhase::Deleting(entry);
                self.error = None;
                Ok(self.id)
            }
            other => self.reject("confirm delete", other),
        }
    }

    /// Success routes back to the list; failure returns to read mode.
    pub fn complete_delete(&mut self, result: Result<(), ClientError>) -> Option<Route> {
        match self.take_phase() {
            DetailPhase::Deleting(entry) => match result {
                Ok(()) => {
                    info!("Deleted entry {}", self.id);
                    self.phase = DetailPhase::Deleted;
                    Some(Route::List)
                }
                Err(e) => {
                    warn!("Deleting entry {} failed: {}", self.id, e);
                    self.error = Some(e.to_string());
                    self.phase = DetailPhase::Reading(entry);
                    None
                }
            },
            other => {
                debug!("Discarding delete response for entry {} while {}", self.id, other.name());
                self.phase = other;
                None
            }
        }
    }

    /// Issue the delete. Only valid once the confirmation is open.
    pub async fn delete(&mut self, backend: &dyn MovieBackend) -> Result<Option<Route>, ViewError> {
        let id = self.confirm_delete()?;
        let result = backend.delete_entry(id).await;
        Ok(self.complete_delete(result))
    }

    fn take_phase(&mut self) -> DetailPhase {
        std::mem::replace(&mut self.phase, DetailPhase::Loading)
    }

    // Put the phase back untouched and report the illegal action
    fn reject<T>(&mut self, action: &'static str, phase: DetailPhase) -> Result<T, ViewError> {
        let err = ViewError::transition(action, phase.name());
        self.phase = phase;
        Err(err)
    }
}
