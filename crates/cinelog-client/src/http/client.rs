use crate::error::ClientError;
use crate::http::api;
use crate::traits::MovieBackend;
use async_trait::async_trait;
use cinelog_config::Config;
use cinelog_models::{Entry, EntryId, EntrySummary, EntryUpdate, NewEntry};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// [`MovieBackend`] over the REST API.
#[derive(Clone)]
pub struct HttpBackend {
    client: Arc<Client>,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(concat!("cinelog/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let base_url = config.base_url()?;
        info!("Using backend at {}", base_url);
        Ok(Self::new(base_url, Duration::from_secs(config.backend.timeout_secs)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieBackend for HttpBackend {
    fn location(&self) -> &str {
        &self.base_url
    }

    async fn list_entries(&self) -> Result<Vec<EntrySummary>, ClientError> {
        api::list_entries(&self.client, &self.base_url).await
    }

    async fn get_entry(&self, id: EntryId) -> Result<Entry, ClientError> {
        api::get_entry(&self.client, &self.base_url, id).await
    }

    async fn create_entry(&self, entry: &NewEntry) -> Result<Entry, ClientError> {
        api::create_entry(&self.client, &self.base_url, entry).await
    }

    async fn update_entry(&self, id: EntryId, update: &EntryUpdate) -> Result<Entry, ClientError> {
        api::update_entry(&self.client, &self.base_url, id, update).await
    }

    async fn delete_entry(&self, id: EntryId) -> Result<(), ClientError> {
        api::delete_entry(&self.client, &self.base_url, id).await
    }
}
