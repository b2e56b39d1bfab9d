//! Draft/authoritative snapshot steps shared by the views.
//!
//! The authoritative copy is only ever replaced wholesale by a server
//! response; drafts are derived from it and never merged back field by field.

use cinelog_models::{Entry, EntryDraft, EntryField};

/// A server-confirmed entry together with a fresh draft of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshots {
    pub authoritative: Entry,
    pub draft: EntryDraft,
}

/// Edit buffer seeded from the authoritative copy.
pub fn draft_from(current: &Entry) -> EntryDraft {
    EntryDraft::from_entry(current)
}

/// Adopt a server response as the new truth and resync the draft to it.
pub fn accept(saved: Entry) -> Snapshots {
    Snapshots {
        draft: draft_from(&saved),
        authoritative: saved,
    }
}

/// Fields where the draft differs from the authoritative copy.
pub fn changed_fields(current: &Entry, draft: &EntryDraft) -> Vec<EntryField> {
    let baseline = draft_from(current);
    EntryField::ALL
        .into_iter()
        .filter(|field| baseline.get(*field) != draft.get(*field))
        .collect()
}
