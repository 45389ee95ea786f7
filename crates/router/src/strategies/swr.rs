//! Stale-while-revalidate strategy: used for sacred reference documents.
//!
//! The documents run to hundreds of kilobytes and change rarely, so a stale
//! copy now beats a fresh copy after a multi-hundred-KB download. A cache
//! hit returns immediately while a detached task refreshes the store; the
//! request path never waits on that task, and its failures are swallowed
//! after logging since no caller remains to observe them.

use super::{RouteCtx, response_from_entry, response_from_network, store_if_success};
use lantern_core::{Error, RouteResponse};
use tokio::task::JoinHandle;

/// Serve the cached entry immediately if present, refreshing in the
/// background; otherwise wait on the network.
///
/// The returned handle belongs to the detached refresh task when one was
/// spawned. [`crate::Router`] discards it; tests await it to observe the
/// refreshed store.
pub async fn stale_while_revalidate(ctx: &RouteCtx) -> Result<(RouteResponse, Option<JoinHandle<()>>), Error> {
    let cached = ctx.store.match_entry(&ctx.generation, &ctx.key()).await.ok().flatten();

    match cached {
        Some(entry) => {
            tracing::debug!(identity = %ctx.identity, "serving stale, revalidating in background");
            let handle = spawn_refresh(ctx.clone());
            Ok((response_from_entry(entry), Some(handle)))
        }
        None => {
            let response = ctx.fetcher.fetch(&ctx.fetch_request()).await?;
            store_if_success(ctx, &response).await;
            Ok((response_from_network(&response), None))
        }
    }
}

/// Fire-and-forget refresh with its own error boundary.
fn spawn_refresh(ctx: RouteCtx) -> JoinHandle<()> {
    tokio::spawn(async move {
        match ctx.fetcher.fetch(&ctx.fetch_request()).await {
            Ok(response) => store_if_success(&ctx, &response).await,
            Err(e) => {
                tracing::warn!(identity = %ctx.identity, error = %e, "background revalidation failed");
            }
        }
    })
}
