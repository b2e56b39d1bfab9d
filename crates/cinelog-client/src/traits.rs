use crate::error::ClientError;
use async_trait::async_trait;
use cinelog_models::{Entry, EntryId, EntrySummary, EntryUpdate, NewEntry};

/// The movie log backend as the views see it.
///
/// Every call is a single request; there is no retry, caching or
/// cancellation behind this trait.
#[async_trait]
pub trait MovieBackend: Send + Sync {
    /// Human-readable location, used in logs.
    fn location(&self) -> &str;

    async fn list_entries(&self) -> Result<Vec<EntrySummary>, ClientError>;
    async fn get_entry(&self, id: EntryId) -> Result<Entry, ClientError>;
    async fn create_entry(&self, entry: &NewEntry) -> Result<Entry, ClientError>;
    async fn update_entry(&self, id: EntryId, update: &EntryUpdate) -> Result<Entry, ClientError>;
    async fn delete_entry(&self, id: EntryId) -> Result<(), ClientError>;
}
