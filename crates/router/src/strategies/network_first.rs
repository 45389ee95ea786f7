//! Network-first strategy: used for dynamic API calls.

use super::{RouteCtx, response_from_entry, response_from_network, store_if_success};
use lantern_core::{Error, RouteResponse};

/// Always try the network first; refresh the store on success. On a fetch
/// failure fall back to the cached entry; if the cache also misses, the
/// failure propagates and the router resolves it through the offline
/// fallback.
pub async fn network_first(ctx: &RouteCtx) -> Result<RouteResponse, Error> {
    match ctx.fetcher.fetch(&ctx.fetch_request()).await {
        Ok(response) => {
            store_if_success(ctx, &response).await;
            Ok(response_from_network(&response))
        }
        Err(network_err) => {
            if let Ok(Some(entry)) = ctx.store.match_entry(&ctx.generation, &ctx.key()).await {
                tracing::debug!(identity = %ctx.identity, "network failed, serving cached API response");
                return Ok(response_from_entry(entry));
            }
            Err(network_err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeFetcher, ctx_for, seed_entry};
    use lantern_core::{CacheDb, ServedFrom};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_network_success_refreshes_store() {
        let store = CacheDb::open_in_memory().await.unwrap();
        store.open_generation("shell-v1").await.unwrap();
        seed_entry(&store, "shell-v1", "/api/quest/42", 200, b"old").await;

        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.ok("http://app.test/api/quest/42", 200, "application/json", b"new");

        let ctx = ctx_for(&store, fetcher, "shell-v1", "/api/quest/42");
        let resp = network_first(&ctx).await.unwrap();

        assert_eq!(resp.body, b"new");
        assert_eq!(resp.served_from, ServedFrom::Network);
        let stored = store.match_entry("shell-v1", &ctx.key()).await.unwrap().unwrap();
        assert_eq!(stored.body, b"new");
    }

    #[tokio::test]
    async fn test_network_failure_falls_back_to_cache() {
        let store = CacheDb::open_in_memory().await.unwrap();
        store.open_generation("shell-v1").await.unwrap();
        seed_entry(&store, "shell-v1", "/api/quest/42", 200, b"prior C").await;

        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.offline("http://app.test/api/quest/42");

        let ctx = ctx_for(&store, fetcher, "shell-v1", "/api/quest/42");
        let resp = network_first(&ctx).await.unwrap();

        assert_eq!(resp.body, b"prior C");
        assert_eq!(resp.served_from, ServedFrom::Cache);
    }

    #[tokio::test]
    async fn test_total_miss_propagates() {
        let store = CacheDb::open_in_memory().await.unwrap();
        store.open_generation("shell-v1").await.unwrap();

        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.offline("http://app.test/api/quest/99");

        let ctx = ctx_for(&store, fetcher, "shell-v1", "/api/quest/99");
        assert!(network_first(&ctx).await.is_err());
    }

    #[tokio::test]
    async fn test_non_success_returned_as_is() {
        let store = CacheDb::open_in_memory().await.unwrap();
        store.open_generation("shell-v1").await.unwrap();

        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.ok("http://app.test/api/quest/42", 422, "application/json", b"err");

        let ctx = ctx_for(&store, fetcher, "shell-v1", "/api/quest/42");
        let resp = network_first(&ctx).await.unwrap();
        assert_eq!(resp.status, 422);
        assert!(store.match_entry("shell-v1", &ctx.key()).await.unwrap().is_none());
    }
}
