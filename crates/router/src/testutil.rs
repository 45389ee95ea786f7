//! Shared test doubles for the router crate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use lantern_client::{FetchRequest, FetchedResponse, Fetcher};
use lantern_core::cache::key::request_key;
use lantern_core::{CacheDb, CacheEntry, Error};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::strategies::RouteCtx;

const TEST_ORIGIN: &str = "http://app.test";

enum Scripted {
    Respond { status: u16, content_type: String, body: Vec<u8> },
    Offline,
}

/// In-memory [`Fetcher`] scripted per URL, recording every call.
pub struct FakeFetcher {
    routes: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self { routes: Mutex::new(HashMap::new()), calls: Mutex::new(Vec::new()) }
    }

    /// Script a response for a URL.
    pub fn ok(&self, url: &str, status: u16, content_type: &str, body: &[u8]) {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            Scripted::Respond { status, content_type: content_type.to_string(), body: body.to_vec() },
        );
    }

    /// Script a transport-level failure for a URL.
    pub fn offline(&self, url: &str) {
        self.routes.lock().unwrap().insert(url.to_string(), Scripted::Offline);
    }

    /// URLs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedResponse, Error> {
        self.calls.lock().unwrap().push(request.url.clone());

        let routes = self.routes.lock().unwrap();
        match routes.get(&request.url) {
            Some(Scripted::Respond { status, content_type, body }) => {
                let mut headers = HeaderMap::new();
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    HeaderValue::from_str(content_type).unwrap(),
                );
                Ok(FetchedResponse {
                    url: request.url.clone(),
                    status: StatusCode::from_u16(*status).unwrap(),
                    headers,
                    bytes: Bytes::from(body.clone()),
                    fetch_ms: 1,
                })
            }
            Some(Scripted::Offline) => Err(Error::Network(format!("offline: {}", request.url))),
            None => Err(Error::Network(format!("unscripted url: {}", request.url))),
        }
    }
}

/// Build a strategy context for an origin-relative identity.
pub fn ctx_for(store: &CacheDb, fetcher: Arc<dyn Fetcher>, generation: &str, identity: &str) -> RouteCtx {
    RouteCtx {
        store: store.clone(),
        fetcher,
        generation: generation.to_string(),
        identity: identity.to_string(),
        fetch_url: format!("{TEST_ORIGIN}{identity}"),
        accept: None,
        timeout: Duration::from_millis(1_000),
    }
}

/// Seed a 200-or-otherwise cache entry for an identity.
pub async fn seed_entry(store: &CacheDb, generation: &str, identity: &str, status: u16, body: &[u8]) {
    let entry = CacheEntry {
        key: request_key("GET", identity),
        url: identity.to_string(),
        status,
        headers: vec![("content-type".to_string(), "text/html".to_string())],
        body: body.to_vec(),
        stored_at: chrono::Utc::now().to_rfc3339(),
    };
    store.put_entry(generation, &entry).await.unwrap();
}
