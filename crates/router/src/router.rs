//! Classify-and-dispatch entry point.
//!
//! Each incoming request is an independent task; the only shared resource
//! is the cache store, whose individual operations are atomic, so no
//! locking happens here.

use std::sync::Arc;
use std::time::Duration;

use lantern_client::{
    Fetcher,
    fetch::{cache_identity, resolve},
};
use lantern_core::{AppConfig, CacheDb, CacheManifests, Request, RouteResponse};

use crate::classify::{RouteClass, classify};
use crate::fallback::{offline_fallback, offline_text};
use crate::lifecycle::GenerationNames;
use crate::strategies::{
    RouteCtx, asset_fallback, cache_first, missing, network_first, network_with_cache_fallback,
    stale_while_revalidate,
};

/// Named per-strategy fetch deadlines.
#[derive(Debug, Clone)]
pub struct StrategyTimeouts {
    pub shell: Duration,
    pub sacred: Duration,
    pub asset: Duration,
    pub api: Duration,
    pub default: Duration,
}

impl StrategyTimeouts {
    fn for_class(&self, class: RouteClass) -> Duration {
        match class {
            RouteClass::CoreShell => self.shell,
            RouteClass::SacredData => self.sacred,
            RouteClass::Asset => self.asset,
            RouteClass::Api => self.api,
            RouteClass::Default => self.default,
        }
    }
}

impl From<&AppConfig> for StrategyTimeouts {
    fn from(config: &AppConfig) -> Self {
        Self {
            shell: config.shell_timeout(),
            sacred: config.sacred_timeout(),
            asset: config.asset_timeout(),
            api: config.api_timeout(),
            default: config.default_timeout(),
        }
    }
}

/// What the router did with a request.
#[derive(Debug)]
pub enum RouteOutcome {
    /// The request was intercepted and this response serves it.
    Handled(RouteResponse),
    /// Non-GET: the caller must send it to the network untouched.
    Passthrough,
}

/// The offline cache router.
///
/// Dependencies are injected rather than ambient so tests can substitute
/// an in-memory store and a scripted fetcher.
pub struct Router {
    store: CacheDb,
    fetcher: Arc<dyn Fetcher>,
    manifests: CacheManifests,
    names: GenerationNames,
    timeouts: StrategyTimeouts,
    origin: String,
}

impl Router {
    pub fn new(
        store: CacheDb, fetcher: Arc<dyn Fetcher>, manifests: CacheManifests, names: GenerationNames,
        timeouts: StrategyTimeouts, origin: impl Into<String>,
    ) -> Self {
        Self { store, fetcher, manifests, names, timeouts, origin: origin.into() }
    }

    /// Build a router wired from application configuration.
    pub fn from_config(
        store: CacheDb, fetcher: Arc<dyn Fetcher>, manifests: CacheManifests, config: &AppConfig,
    ) -> Self {
        let names =
            GenerationNames { shell: config.shell_generation.clone(), sacred: config.sacred_generation.clone() };
        Self::new(store, fetcher, manifests, names, StrategyTimeouts::from(config), config.origin.clone())
    }

    /// Route one request.
    ///
    /// Never returns an error: strategies swallow their own sub-failures and
    /// anything that still propagates terminates in the offline fallback
    /// resolver, which always produces a well-formed response.
    pub async fn handle(&self, request: &Request) -> RouteOutcome {
        if !request.is_get() {
            return RouteOutcome::Passthrough;
        }

        let path = request.path();
        let class = classify(&path, &self.manifests);
        let ctx = match self.ctx_for(request, class) {
            Ok(ctx) => ctx,
            Err(response) => return RouteOutcome::Handled(response),
        };

        tracing::debug!(path = %path, class = ?class, "routing");

        let result = match class {
            RouteClass::CoreShell => cache_first(&ctx).await,
            RouteClass::SacredData => {
                // The refresh task keeps running after the response is
                // returned; its handle is deliberately dropped.
                stale_while_revalidate(&ctx).await.map(|(response, _handle)| response)
            }
            RouteClass::Asset => return RouteOutcome::Handled(asset_fallback(&ctx).await),
            RouteClass::Api => network_first(&ctx).await,
            RouteClass::Default => network_with_cache_fallback(&ctx).await,
        };

        match result {
            Ok(response) => RouteOutcome::Handled(response),
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "strategy exhausted, serving offline fallback");
                RouteOutcome::Handled(offline_fallback(&self.store, &self.names.shell, request).await)
            }
        }
    }

    fn ctx_for(&self, request: &Request, class: RouteClass) -> Result<RouteCtx, RouteResponse> {
        let resolved = match resolve(&self.origin, &request.url) {
            Ok(url) => url,
            Err(e) => {
                // An unroutable URL is terminal by definition. Assets still
                // degrade silently; everything else gets the offline text.
                tracing::debug!(url = %request.url, error = %e, "unresolvable request URL");
                return Err(if class == RouteClass::Asset { missing() } else { offline_text() });
            }
        };

        let generation =
            if class == RouteClass::SacredData { self.names.sacred.clone() } else { self.names.shell.clone() };

        Ok(RouteCtx {
            store: self.store.clone(),
            fetcher: self.fetcher.clone(),
            generation,
            identity: cache_identity(&self.origin, &resolved),
            fetch_url: resolved.to_string(),
            accept: request.accept.clone(),
            timeout: self.timeouts.for_class(class),
        })
    }
}
