//! Network-with-cache-fallback strategy: the balanced default for
//! unclassified requests.
//!
//! Same shape as network-first, but it is the one strategy whose total
//! exhaustion is expected to reach the offline fallback resolver, so the
//! error it propagates says so.

use super::{RouteCtx, response_from_entry, response_from_network, store_if_success};
use lantern_core::{Error, RouteResponse};

/// Try the network, keeping a copy on success; on any failure serve the
/// cached entry; when both are exhausted, propagate for terminal fallback.
pub async fn network_with_cache_fallback(ctx: &RouteCtx) -> Result<RouteResponse, Error> {
    match ctx.fetcher.fetch(&ctx.fetch_request()).await {
        Ok(response) => {
            store_if_success(ctx, &response).await;
            Ok(response_from_network(&response))
        }
        Err(network_err) => {
            if let Ok(Some(entry)) = ctx.store.match_entry(&ctx.generation, &ctx.key()).await {
                tracing::debug!(identity = %ctx.identity, "network failed, serving cached response");
                return Ok(response_from_entry(entry));
            }
            Err(Error::RouteExhausted(format!("{}: {}", ctx.identity, network_err)))
        }
    }
}
