//! Request classification.
//!
//! A pure function over the request path: ordered predicates, first match
//! wins. Classification is recomputed per request and stored nowhere.

use lantern_core::CacheManifests;

/// The five route classes, each bound to one routing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Application shell: entry point and fixed script/style assets.
    CoreShell,
    /// Large, rarely-changing reference JSON documents.
    SacredData,
    /// Best-effort imagery, fonts, and wasm binaries.
    Asset,
    /// Dynamic API calls.
    Api,
    /// Everything unclassified.
    Default,
}

/// Binary asset extensions served best-effort.
const ASSET_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "woff", "woff2", "ttf", "otf", "wasm",
];

/// Static directories asset paths must live under.
const STATIC_DIRS: &[&str] = &["/assets/", "/icons/", "/images/", "/fonts/", "/static/"];

/// Classify a request path. First match wins:
/// 1. `/` or a core-shell manifest member
/// 2. a sacred-data manifest member
/// 3. a binary asset extension under a static directory
/// 4. a path containing an API segment
/// 5. everything else
pub fn classify(path: &str, manifests: &CacheManifests) -> RouteClass {
    if path == "/" || manifests.is_core_shell(path) {
        return RouteClass::CoreShell;
    }
    if manifests.is_sacred_data(path) {
        return RouteClass::SacredData;
    }
    if is_asset_path(path) {
        return RouteClass::Asset;
    }
    if is_api_path(path) {
        return RouteClass::Api;
    }
    RouteClass::Default
}

fn is_asset_path(path: &str) -> bool {
    if !STATIC_DIRS.iter().any(|dir| path.starts_with(dir)) {
        return false;
    }
    path.rsplit('.')
        .next()
        .is_some_and(|ext| ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

pub(crate) fn is_api_path(path: &str) -> bool {
    path.contains("/api/")
}
