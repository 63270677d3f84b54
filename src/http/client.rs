//! HTTP client for collection reads
//!
//! Provides a small HTTP client that handles:
//! - Default headers and user agent from the fetcher config
//! - Cache-defeating GET requests
//! - Error classification into transport failures

use crate::config::FetcherConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Query parameter carrying the cache-busting timestamp
pub const CACHE_BUST_PARAM: &str = "_";

/// A response that came back with a 2xx status
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

/// HTTP client bound to a fetcher config
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
}

impl HttpClient {
    /// Create a new HTTP client from a fetcher config
    pub fn with_config(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        let mut default_headers: Vec<(String, String)> = config
            .default_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        default_headers.sort();

        Ok(Self {
            client,
            timeout: config.timeout(),
            default_headers,
        })
    }

    /// Issue a GET that bypasses HTTP caches
    ///
    /// Sends `Cache-Control: no-cache` and `Pragma: no-cache` and appends a
    /// `_=<unix millis>` query parameter after `query`.
    pub async fn get_uncached(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse> {
        let mut req = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .timeout(self.timeout);

        for (key, value) in &self.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !query.is_empty() {
            req = req.query(query);
        }
        let stamp = chrono::Utc::now().timestamp_millis().to_string();
        req = req.query(&[(CACHE_BUST_PARAM, stamp.as_str())]);

        debug!("GET {url}");

        let response = req.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
                body,
            ));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!("GET {url} -> {} ({} bytes)", status.as_u16(), body.len());

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    fn classify(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(error)
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("timeout", &self.timeout)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}
