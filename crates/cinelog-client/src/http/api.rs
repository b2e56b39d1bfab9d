use crate::error::{ClientError, Operation};
use cinelog_models::{Entry, EntryId, EntrySummary, EntryUpdate, NewEntry};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const MOVIES_PATH: &str = "/api/movies/";

pub fn collection_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), MOVIES_PATH)
}

pub fn entry_url(base_url: &str, id: EntryId) -> String {
    format!("{}{}/", collection_url(base_url), id)
}

/// Fetch every entry summary
pub async fn list_entries(client: &Client, base_url: &str) -> Result<Vec<EntrySummary>, ClientError> {
    let url = collection_url(base_url);
    debug!("GET {}", url);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ClientError::transport(Operation::List, e))?;

    let response = ensure_success(Operation::List, response).await?;
    read_json(Operation::List, response).await
}

/// Fetch one full entry
pub async fn get_entry(client: &Client, base_url: &str, id: EntryId) -> Result<Entry, ClientError> {
    let url = entry_url(base_url, id);
    debug!("GET {}", url);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ClientError::transport(Operation::Get, e))?;

    let response = ensure_success(Operation::Get, response).await?;
    read_json(Operation::Get, response).await
}

/// Create an entry from a multipart form (text fields plus optional poster)
pub async fn create_entry(client: &Client, base_url: &str, entry: &NewEntry) -> Result<Entry, ClientError> {
    let url = collection_url(base_url);
    debug!(
        "POST {} ({} fields, poster: {})",
        url,
        entry.fields.len(),
        entry.poster.as_ref().map(|p| p.file_name()).unwrap_or("none")
    );

    let form = build_form(entry).map_err(|e| ClientError::transport(Operation::Create, e))?;

    let response = client
        .post(&url)
        .header("Accept", "application/json")
        .multipart(form)
        .send()
        .await
        .map_err(|e| ClientError::transport(Operation::Create, e))?;

    let response = ensure_success(Operation::Create, response).await?;
    read_json(Operation::Create, response).await
}

/// Replace an entry with the given draft (JSON, never the poster)
pub async fn update_entry(
    client: &Client,
    base_url: &str,
    id: EntryId,
    update: &EntryUpdate,
) -> Result<Entry, ClientError> {
    let url = entry_url(base_url, id);
    debug!("PUT {}", url);

    let response = client
        .put(&url)
        .header("Accept", "application/json")
        .json(update)
        .send()
        .await
        .map_err(|e| ClientError::transport(Operation::Update, e))?;

    let response = ensure_success(Operation::Update, response).await?;
    read_json(Operation::Update, response).await
}

/// Delete an entry; only the status matters
pub async fn delete_entry(client: &Client, base_url: &str, id: EntryId) -> Result<(), ClientError> {
    let url = entry_url(base_url, id);
    debug!("DELETE {}", url);

    let response = client
        .delete(&url)
        .send()
        .await
        .map_err(|e| ClientError::transport(Operation::Delete, e))?;

    ensure_success(Operation::Delete, response).await?;
    Ok(())
}

fn build_form(entry: &NewEntry) -> reqwest::Result<Form> {
    let mut form = Form::new();
    for (key, value) in &entry.fields {
        form = form.text(*key, value.clone());
    }

    if let Some(poster) = &entry.poster {
        let part = Part::bytes(poster.bytes().to_vec())
            .file_name(poster.file_name().to_string())
            .mime_str(poster.mime_type())?;
        form = form.part(NewEntry::POSTER_KEY, part);
    }

    Ok(form)
}

async fn ensure_success(operation: Operation, response: Response) -> Result<Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    warn!("Backend rejected request to {}: {} - {}", operation, status, error_text);
    Err(ClientError::status(operation, status.as_u16(), error_text))
}

async fn read_json<T: DeserializeOwned>(operation: Operation, response: Response) -> Result<T, ClientError> {
    let text = response
        .text()
        .await
        .map_err(|e| ClientError::transport(operation, e))?;
    parse_body(operation, &text)
}

pub(crate) fn parse_body<T: DeserializeOwned>(operation: Operation, text: &str) -> Result<T, ClientError> {
    if text.trim().is_empty() {
        return Err(ClientError::body(operation, "the response body was empty"));
    }
    serde_json::from_str(text).map_err(|e| ClientError::body(operation, e.to_string()))
}
