//! Cache-first-with-fallback strategy: used for best-effort assets.
//!
//! Imagery, fonts, and wasm binaries are non-critical; a missing icon must
//! not take down a page. Every failure path collapses into an empty 404
//! instead of escalating to the offline fallback resolver.

use super::{RouteCtx, response_from_entry, response_from_network, store_if_success};
use lantern_core::{RouteResponse, ServedFrom};

/// Serve from cache, else network, else an empty "missing" response.
/// Infallible by construction.
pub async fn asset_fallback(ctx: &RouteCtx) -> RouteResponse {
    if let Ok(Some(entry)) = ctx.store.match_entry(&ctx.generation, &ctx.key()).await {
        return response_from_entry(entry);
    }

    match ctx.fetcher.fetch(&ctx.fetch_request()).await {
        Ok(response) => {
            store_if_success(ctx, &response).await;
            response_from_network(&response)
        }
        Err(e) => {
            tracing::debug!(identity = %ctx.identity, error = %e, "asset unavailable");
            missing()
        }
    }
}

/// Empty 404 for an asset with nothing to serve. The router also uses this
/// for asset requests whose URL never resolved.
pub(crate) fn missing() -> RouteResponse {
    RouteResponse { status: 404, headers: Vec::new(), body: Vec::new(), served_from: ServedFrom::Missing }
}
