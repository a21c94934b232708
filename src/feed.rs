//! Acquisition of the bill feed.
//!
//! A feed is fetched once per session from a [`FeedSource`] and decoded into a
//! [`BillCollection`]. Two payload shapes are accepted: the scraper's
//! `{ "bills": [...], "last_updated": ... }` object, and the older bare array of
//! `{ id, date, url, description, analysis_url }` entries.

use crate::dates::parse_action_date;
use crate::error::LoadError;
use crate::types::{BillCollection, BillRecord};
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;

/// Something that can produce the raw feed bytes
pub trait FeedSource {
    /// Human-readable location, used in error messages and logs
    fn location(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;
}

/// Where the feed lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Http(String),
    File(PathBuf),
}

impl FeedLocation {
    /// URLs with an http(s) scheme are fetched over HTTP, anything else is a path
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            FeedLocation::Http(trimmed.to_string())
        } else {
            FeedLocation::File(PathBuf::from(trimmed))
        }
    }
}

impl FeedSource for FeedLocation {
    fn location(&self) -> String {
        match self {
            FeedLocation::Http(url) => url.clone(),
            FeedLocation::File(path) => path.display().to_string(),
        }
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            FeedLocation::Http(url) => HttpSource::new(url.clone()).fetch().await,
            FeedLocation::File(path) => FileSource::new(path.clone()).fetch().await,
        }
    }
}

/// Fetches the feed with a single GET request
#[derive(Debug, Clone)]
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

impl FeedSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let unreachable = |e: reqwest::Error| LoadError::Unreachable {
            location: self.url.clone(),
            cause: e.to_string(),
        };

        let response = self.client.get(&self.url).send().await.map_err(unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                location: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(unreachable)?;
        Ok(body.to_vec())
    }
}

/// Reads the feed from a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| LoadError::Unreadable {
                location: self.location(),
                cause: e.to_string(),
            })
    }
}

/// Canned feed contents or a canned failure
#[derive(Debug, Clone)]
pub struct StaticSource {
    result: Result<Vec<u8>, LoadError>,
}

impl StaticSource {
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            result: Ok(bytes.into()),
        }
    }

    pub fn json(value: &Value) -> Self {
        Self::bytes(value.to_string())
    }

    pub fn failing(error: LoadError) -> Self {
        Self { result: Err(error) }
    }
}

impl FeedSource for StaticSource {
    fn location(&self) -> String {
        "<static>".to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        self.result.clone()
    }
}

/// Fetch and decode a feed
pub async fn load_collection<S: FeedSource>(source: &S) -> Result<BillCollection, LoadError> {
    log::debug!("Fetching bill feed from {}", source.location());
    let bytes = source.fetch().await?;
    decode_feed(&bytes)
}

#[derive(Debug, Deserialize)]
struct RichFeed {
    bills: Vec<BillRecord>,
    #[serde(default)]
    last_updated: Option<String>,
    #[serde(default)]
    total_bills: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct LegacyEntry {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "analysis", alias = "analysisUrl", alias = "analysis_link")]
    analysis_url: Option<String>,
}

impl From<LegacyEntry> for BillRecord {
    fn from(entry: LegacyEntry) -> Self {
        let bill_number = match &entry.id {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        };

        let mut record = BillRecord::new("", "", bill_number);
        record.last_action_date = entry.date;
        record.source_url = entry.url.unwrap_or_default();
        record.description = entry.description;
        record.analysis_url = entry.analysis_url;
        record
    }
}

/// Decode raw feed bytes into a collection
pub fn decode_feed(bytes: &[u8]) -> Result<BillCollection, LoadError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| LoadError::Malformed(e.to_string()))?;

    if matches!(&value, Value::Object(map) if map.contains_key("bills")) {
        let feed: RichFeed =
            serde_json::from_value(value).map_err(|e| LoadError::Malformed(e.to_string()))?;

        if let Some(total) = feed.total_bills {
            if total != feed.bills.len() {
                log::warn!(
                    "Feed reports {} bills but contains {}",
                    total,
                    feed.bills.len()
                );
            }
        }

        let last_updated = feed.last_updated.as_deref().and_then(|raw| {
            let parsed = parse_action_date(raw);
            if parsed.is_none() {
                log::warn!("Ignoring unparseable last_updated value: {}", raw);
            }
            parsed
        });

        log::info!("Loaded {} bills", feed.bills.len());
        return Ok(BillCollection::new(feed.bills, last_updated));
    }

    if value.is_array() {
        let entries: Vec<LegacyEntry> =
            serde_json::from_value(value).map_err(|e| LoadError::Malformed(e.to_string()))?;
        log::info!("Loaded {} bills from legacy feed", entries.len());
        return Ok(BillCollection::new(
            entries.into_iter().map(BillRecord::from).collect(),
            None,
        ));
    }

    Err(LoadError::Malformed(
        "expected an object with a `bills` array or a bare array of bills".to_string(),
    ))
}
