//! The five routing strategies.
//!
//! Each strategy takes a [`RouteCtx`] and produces a response, trading
//! freshness against availability differently per route class:
//!
//! - [`cache_first`] for the immutable app shell: speed over freshness
//! - [`stale_while_revalidate`] for large reference documents: staleness over
//!   latency, refreshed by a detached background task
//! - [`asset_fallback`] for best-effort imagery/fonts: degrade silently
//! - [`network_first`] for dynamic API calls: freshness over availability
//! - [`network_with_cache_fallback`] as the balanced default for everything else
//!
//! Failures are recovered as close to their origin as each strategy's rules
//! allow; only total exhaustion propagates, and the router maps that onto
//! the offline fallback resolver. Write failures while copying a network
//! response into the store are logged and swallowed: the caller already has
//! its response.

mod asset;
mod cache_first;
mod network_fallback;
mod network_first;
mod swr;

use std::sync::Arc;
use std::time::Duration;

use lantern_client::{FetchRequest, FetchedResponse, Fetcher};
use lantern_core::cache::key::request_key;
use lantern_core::{CacheDb, CacheEntry, RouteResponse, ServedFrom};

pub use asset::asset_fallback;
pub(crate) use asset::missing;
pub use cache_first::cache_first;
pub use network_fallback::network_with_cache_fallback;
pub use network_first::network_first;
pub use swr::stale_while_revalidate;

/// Everything one strategy invocation needs. Owned, so the
/// stale-while-revalidate strategy can move a copy into its detached
/// refresh task.
#[derive(Clone)]
pub struct RouteCtx {
    pub store: CacheDb,
    pub fetcher: Arc<dyn Fetcher>,
    /// Generation the strategy reads from and writes to.
    pub generation: String,
    /// Cache identity: path plus query for same-origin resources, the full
    /// canonical URL for foreign origins.
    pub identity: String,
    /// Absolute URL for network fetches.
    pub fetch_url: String,
    /// Accept header to forward.
    pub accept: Option<String>,
    /// Named per-strategy fetch deadline.
    pub timeout: Duration,
}

impl RouteCtx {
    /// Cache key for this request.
    pub fn key(&self) -> String {
        request_key("GET", &self.identity)
    }

    pub(crate) fn fetch_request(&self) -> FetchRequest {
        FetchRequest::new(self.fetch_url.clone(), self.timeout).with_accept(self.accept.clone())
    }
}

/// Snapshot a network response into a cache entry.
pub(crate) fn entry_from_network(ctx: &RouteCtx, response: &FetchedResponse) -> CacheEntry {
    CacheEntry {
        key: ctx.key(),
        url: ctx.identity.clone(),
        status: response.status.as_u16(),
        headers: response.header_pairs(),
        body: response.bytes.to_vec(),
        stored_at: chrono::Utc::now().to_rfc3339(),
    }
}

pub(crate) fn response_from_entry(entry: CacheEntry) -> RouteResponse {
    RouteResponse { status: entry.status, headers: entry.headers, body: entry.body, served_from: ServedFrom::Cache }
}

pub(crate) fn response_from_network(response: &FetchedResponse) -> RouteResponse {
    RouteResponse {
        status: response.status.as_u16(),
        headers: response.header_pairs(),
        body: response.bytes.to_vec(),
        served_from: ServedFrom::Network,
    }
}

/// Copy a successful (2xx) network response into the store. Non-2xx
/// responses are returned to callers but never cached; store failures are
/// logged, not surfaced.
pub(crate) async fn store_if_success(ctx: &RouteCtx, response: &FetchedResponse) {
    if !response.status.is_success() {
        return;
    }
    let entry = entry_from_network(ctx, response);
    if let Err(e) = ctx.store.put_entry(&ctx.generation, &entry).await {
        tracing::warn!(identity = %ctx.identity, error = %e, "failed to cache network response");
    }
}
