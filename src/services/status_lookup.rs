//! Status backend access (ILS availability lookups)

use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::{
    config::BackendConfig,
    error::{AppError, AppResult},
    models::item_copy::ItemCopy,
};

/// Copies per requested title, in the order the backend returned them
pub type StatusMap = IndexMap<String, Vec<ItemCopy>>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusLookup: Send + Sync {
    /// Fetch the copies of every requested title in one call
    async fn get_statuses(&self, ids: &[String]) -> AppResult<StatusMap>;
}

/// HTTP client for a status backend answering
/// `GET {url}?id[]=A&id[]=B` with `{"A": [copy, ...], ...}`
#[derive(Debug, Clone)]
pub struct HttpStatusLookup {
    http: Client,
    url: Url,
}

impl HttpStatusLookup {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let url = Url::parse(&config.url)
            .map_err(|e| AppError::Internal(format!("Invalid status backend URL {}: {}", config.url, e)))?;
        let http = Client::builder()
            .user_agent(concat!("holdings-status/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { http, url })
    }

    pub fn build_request(&self, ids: &[String]) -> AppResult<reqwest::Request> {
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("id[]", id.as_str())).collect();
        self.http
            .get(self.url.clone())
            .query(&query)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build status request: {}", e)))
    }
}

#[async_trait]
impl StatusLookup for HttpStatusLookup {
    async fn get_statuses(&self, ids: &[String]) -> AppResult<StatusMap> {
        let request = self.build_request(ids)?;
        tracing::debug!(url = %request.url(), "Requesting item statuses");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| AppError::Backend(format!("Failed to reach status backend: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!("Failed to read error body from status backend: {}", e);
                String::new()
            });
            return Err(backend_error(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to read status response: {}", e)))?;

        Ok(parse_status_payload(&body))
    }
}

/// Error for a non-success answer from the backend
fn backend_error(status: StatusCode, body: &str) -> AppError {
    let body = body.trim();
    if body.is_empty() {
        AppError::Backend(format!("status backend returned {}", status))
    } else {
        AppError::Backend(format!("status backend returned {}: {}", status, body))
    }
}

/// Decode a backend payload. Anything that is not an object of copy arrays
/// is treated as "no data"; malformed copies are skipped.
pub fn parse_status_payload(body: &str) -> StatusMap {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Status backend returned unparseable payload: {}", e);
            return StatusMap::new();
        }
    };

    let Value::Object(records) = value else {
        tracing::warn!("Status backend returned a non-object payload");
        return StatusMap::new();
    };

    let mut statuses = StatusMap::new();
    for (id, copies) in records {
        let Value::Array(copies) = copies else {
            tracing::warn!("Ignoring non-list status entry for {}", id);
            continue;
        };
        let copies = copies
            .into_iter()
            .filter_map(|copy| match serde_json::from_value::<ItemCopy>(copy) {
                Ok(copy) => Some(copy),
                Err(e) => {
                    tracing::warn!("Skipping malformed copy of {}: {}", id, e);
                    None
                }
            })
            .collect();
        statuses.insert(id, copies);
    }
    statuses
}

/// Lookup over a fixed set of copies
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatusLookup {
    records: StatusMap,
}

impl InMemoryStatusLookup {
    pub fn new(records: StatusMap) -> Self {
        Self { records }
    }

    pub fn with_copies(mut self, id: &str, copies: Vec<ItemCopy>) -> Self {
        self.records.insert(id.to_string(), copies);
        self
    }
}

#[async_trait]
impl StatusLookup for InMemoryStatusLookup {
    async fn get_statuses(&self, ids: &[String]) -> AppResult<StatusMap> {
        Ok(self
            .records
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(id, copies)| (id.clone(), copies.clone()))
            .collect())
    }
}
