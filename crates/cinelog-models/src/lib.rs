pub mod draft;
pub mod entry;
pub mod error;
pub mod payload;
pub mod poster;
pub mod rating;

pub use draft::{EntryDraft, EntryField};
pub use entry::{split_list, Entry, EntryId, EntrySummary};
pub use error::ModelError;
pub use payload::{EntryUpdate, NewEntry};
pub use poster::StagedPoster;
pub use rating::Rating;
