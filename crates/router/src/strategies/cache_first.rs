//! Cache-first strategy: used for the core application shell.

use super::{RouteCtx, response_from_entry, response_from_network, store_if_success};
use lantern_core::{Error, RouteResponse};

/// Serve from the cache if possible, never touching the network on a hit.
///
/// On a miss, fetch from the network, keep a copy when the response is
/// successful, and return the response either way. A fetch failure
/// propagates; the router resolves it through the offline fallback.
pub async fn cache_first(ctx: &RouteCtx) -> Result<RouteResponse, Error> {
    if let Ok(Some(entry)) = ctx.store.match_entry(&ctx.generation, &ctx.key()).await {
        tracing::debug!(identity = %ctx.identity, "cache-first hit");
        return Ok(response_from_entry(entry));
    }

    let response = ctx.fetcher.fetch(&ctx.fetch_request()).await?;
    store_if_success(ctx, &response).await;
    Ok(response_from_network(&response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeFetcher, ctx_for, seed_entry};
    use lantern_core::{CacheDb, ServedFrom};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_hit_never_fetches() {
        let store = CacheDb::open_in_memory().await.unwrap();
        store.open_generation("shell-v1").await.unwrap();
        seed_entry(&store, "shell-v1", "/index.html", 200, b"cached shell").await;

        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.ok("http://app.test/index.html", 200, "text/html", b"fresh shell");

        let ctx = ctx_for(&store, fetcher.clone(), "shell-v1", "/index.html");
        let resp = cache_first(&ctx).await.unwrap();

        assert_eq!(resp.body, b"cached shell");
        assert_eq!(resp.served_from, ServedFrom::Cache);
        assert_eq!(fetcher.calls(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn test_miss_fetches_and_stores() {
        let store = CacheDb::open_in_memory().await.unwrap();
        store.open_generation("shell-v1").await.unwrap();

        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.ok("http://app.test/index.html", 200, "text/html", b"shell body");

        let ctx = ctx_for(&store, fetcher, "shell-v1", "/index.html");
        let resp = cache_first(&ctx).await.unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, b"shell body");
        assert_eq!(resp.served_from, ServedFrom::Network);

        let stored = store.match_entry("shell-v1", &ctx.key()).await.unwrap().unwrap();
        assert_eq!(stored.body, b"shell body");
    }

    #[tokio::test]
    async fn test_non_success_returned_but_not_cached() {
        let store = CacheDb::open_in_memory().await.unwrap();
        store.open_generation("shell-v1").await.unwrap();

        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.ok("http://app.test/index.html", 500, "text/html", b"boom");

        let ctx = ctx_for(&store, fetcher, "shell-v1", "/index.html");
        let resp = cache_first(&ctx).await.unwrap();

        assert_eq!(resp.status, 500);
        assert!(store.match_entry("shell-v1", &ctx.key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_miss_with_network_failure_propagates() {
        let store = CacheDb::open_in_memory().await.unwrap();
        store.open_generation("shell-v1").await.unwrap();

        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.offline("http://app.test/index.html");

        let ctx = ctx_for(&store, fetcher, "shell-v1", "/index.html");
        assert!(cache_first(&ctx).await.is_err());
    }
}
