//! Offline fallback resolver.
//!
//! The single terminal point of failure for the routing subsystem. Every
//! branch produces a well-formed response and nothing here can fail: store
//! read errors degrade to the plain-text branch.

use crate::classify::is_api_path;
use lantern_core::cache::key::request_key;
use lantern_core::{CacheDb, Request, RouteResponse, ServedFrom};

pub(crate) const OFFLINE_MESSAGE: &str = "Service unavailable while offline";

/// Plain-text offline response, the terminal branch of the resolver.
/// Also serves the router's unresolvable-URL path.
pub(crate) fn offline_text() -> RouteResponse {
    RouteResponse {
        status: 503,
        headers: vec![("content-type".to_string(), "text/plain".to_string())],
        body: OFFLINE_MESSAGE.as_bytes().to_vec(),
        served_from: ServedFrom::Fallback,
    }
}

/// Produce a substitute response when a strategy has exhausted every
/// fallback it defines.
///
/// Branches on the original request's declared accept-type, not on its
/// route class:
/// - HTML-accepting requests get the cached shell root document, so
///   client-side routing keeps working offline
/// - API paths get a structured JSON payload with an explicit offline flag
/// - everything else gets plain text
pub async fn offline_fallback(store: &CacheDb, shell_generation: &str, request: &Request) -> RouteResponse {
    if request.accepts_html()
        && let Ok(Some(shell)) = store.match_entry(shell_generation, &request_key("GET", "/")).await
    {
        return RouteResponse {
            status: shell.status,
            headers: shell.headers,
            body: shell.body,
            served_from: ServedFrom::Fallback,
        };
    }

    if is_api_path(&request.path()) {
        let payload = serde_json::json!({
            "error": "offline",
            "message": OFFLINE_MESSAGE,
            "offline": true,
        });
        return RouteResponse {
            status: 503,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: payload.to_string().into_bytes(),
            served_from: ServedFrom::Fallback,
        };
    }

    offline_text()
}
