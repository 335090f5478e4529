//! Record sources: where a record set is fetched from
//!
//! The review core only sees a parsed [`RecordSet`]. Sources turn a file or an
//! HTTP endpoint returning `{ "records": [...] }` into one.

use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{Result, ReviewError};
use crate::models::{ApiResponse, RecordSet};

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Human-readable description used in logs and error messages
    fn describe(&self) -> String;

    /// Fetch a complete record set
    async fn fetch(&self) -> Result<RecordSet>;
}

/// Reads the records payload from a JSON file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<RecordSet> {
        debug!("Reading records from {}", self.path.display());

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ReviewError::fetch(&self.describe(), e))?;
        let response: ApiResponse =
            serde_json::from_str(&contents).map_err(|e| ReviewError::fetch(&self.describe(), e))?;

        info!("Loaded {} records from {}", response.records.len(), self.path.display());
        Ok(RecordSet::from(response))
    }
}

/// Fetches the records payload with an HTTP GET
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: &str, config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<RecordSet> {
        debug!("Requesting records from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ReviewError::fetch(&self.url, e))?;

        let payload: ApiResponse = response
            .json()
            .await
            .map_err(|e| ReviewError::fetch(&self.url, e))?;

        info!("Fetched {} records from {}", payload.records.len(), self.url);
        Ok(RecordSet::from(payload))
    }
}

/// Pick a source for `location`: http(s) URLs go over the network, anything
/// else is treated as a file path.
pub fn source_for(location: &str, config: &Config) -> Result<Box<dyn RecordSource>> {
    if location.trim().is_empty() {
        return Err(ReviewError::Config("no record source given".to_string()));
    }

    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, config)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
