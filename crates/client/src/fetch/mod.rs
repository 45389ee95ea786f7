//! HTTP fetch pipeline.
//!
//! ### URL Canonicalization
//! - Trim whitespace, resolve origin-relative paths against the app origin
//! - Lowercase host, remove fragments
//! - Preserve query string
//!
//! ### Limits
//! - Max redirects: 5
//! - Max body bytes: 10MB (configurable)
//! - Per-request deadline passed in by the caller (each routing strategy
//!   carries its own)
//!
//! ### Forced reloads
//! Install-time population bypasses intermediary HTTP caches by sending
//! `Cache-Control: no-cache` / `Pragma: no-cache`.

pub mod url;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, header};

pub use url::{UrlError, cache_identity, canonicalize, resolve};

use lantern_core::Error;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "lantern/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 10MB)
    pub max_bytes: usize,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: "lantern/0.1".to_string(), max_bytes: 10 * 1024 * 1024, max_redirects: 5 }
    }
}

/// A single outgoing fetch, with its own deadline.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Absolute URL to fetch.
    pub url: String,
    /// Accept header to forward, if any.
    pub accept: Option<String>,
    /// Bypass intermediary HTTP caches (install-time population).
    pub reload: bool,
    /// Deadline for the whole request.
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self { url: url.into(), accept: None, reload: false, timeout }
    }

    pub fn with_accept(mut self, accept: Option<String>) -> Self {
        self.accept = accept;
        self
    }

    pub fn reload(mut self) -> Self {
        self.reload = true;
        self
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    /// The final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: header::HeaderMap,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl FetchedResponse {
    /// Headers as owned (name, value) pairs, skipping non-UTF8 values.
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect()
    }
}

/// The network seam the router and lifecycle manager depend on.
///
/// A non-2xx status is a response, not an error; only transport-level
/// failures (refusals, timeouts, oversized bodies) are `Err`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedResponse, Error>;
}

/// HTTP fetch client backed by reqwest.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl Fetcher for FetchClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedResponse, Error> {
        let start = Instant::now();
        let url = canonicalize(&request.url).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let mut req = self.http.get(url.as_str()).timeout(request.timeout);

        if let Some(accept) = &request.accept {
            req = req.header(header::ACCEPT, accept);
        }
        if request.reload {
            req = req
                .header(header::CACHE_CONTROL, "no-cache")
                .header(header::PRAGMA, "no-cache");
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::FetchTimeout(format!("{} after {:?}", url, request.timeout))
            } else {
                Error::Network(format!("network error: {}", e))
            }
        })?;

        let status = response.status();

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let final_url = response.url().clone();
        let headers = response.headers().clone();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("failed to read response: {}", e)))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!(
                "{} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} -> {} in {}ms ({} bytes)", url, status, fetch_ms, bytes.len());

        Ok(FetchedResponse { url: final_url.to_string(), status, headers, bytes, fetch_ms })
    }
}
