//! Content sources: where the slide document comes from.

use crate::deck::Deck;
use crate::error::{LoadError, Result};
use crate::protocol::DeckEvent;
use async_trait::async_trait;
use deckview_common::ContentDocument;
use std::path::PathBuf;

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Name shown in user-visible messages.
    fn label(&self) -> &str;

    /// `Ok(None)` when the response is present but `null`.
    async fn fetch(&self) -> Result<Option<ContentDocument>>;
}

/// Parse a raw response body.
pub fn parse_document(bytes: &[u8]) -> Result<Option<ContentDocument>> {
    Ok(serde_json::from_slice(bytes)?)
}

pub struct FileSource {
    path: PathBuf,
    label: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

#[async_trait]
impl ContentSource for FileSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch(&self) -> Result<Option<ContentDocument>> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_document(&bytes)
    }
}

pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    fn label(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Option<ContentDocument>> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        let bytes = response.bytes().await?;
        parse_document(&bytes)
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// HTTP for `http(s)://` locations, the filesystem otherwise.
pub fn source_for(location: &str) -> Box<dyn ContentSource> {
    if is_remote(location) {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Fetch once and turn the outcome into the matching load event.
pub async fn load(source: &dyn ContentSource) -> DeckEvent {
    tracing::debug!("fetching {}", source.label());
    match source.fetch().await {
        Ok(document) => DeckEvent::LoadSucceeded(Deck::from_document(document)),
        Err(err) => DeckEvent::LoadFailed(err.to_string()),
    }
}
