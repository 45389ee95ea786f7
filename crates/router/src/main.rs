//! lantern cache warm-up entry point.
//!
//! Runs the install/activate lifecycle against the configured origin:
//! populates the two current cache generations from the manifests, then
//! deletes superseded generations. Logging goes to stderr as JSON.

use std::sync::Arc;

use anyhow::Result;
use lantern_client::{FetchClient, FetchConfig};
use lantern_core::{AppConfig, CacheDb};
use lantern_router::lifecycle::{self, GenerationNames};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let manifests = config.load_manifests()?;

    tracing::info!(db_path = %config.db_path.display(), origin = %config.origin, "warming cache");

    let store = CacheDb::open(&config.db_path).await?;
    let fetcher = Arc::new(FetchClient::new(FetchConfig {
        user_agent: config.user_agent.clone(),
        max_bytes: config.max_bytes,
        ..Default::default()
    })?);

    let names = GenerationNames { shell: config.shell_generation.clone(), sacred: config.sacred_generation.clone() };

    let report =
        lifecycle::install(&store, fetcher, &manifests, &names, &config.origin, config.sacred_timeout()).await?;
    let deleted = lifecycle::activate(&store, &names).await?;

    tracing::info!(
        shell_entries = report.shell_entries,
        sacred_entries = report.sacred_entries,
        deleted_generations = deleted.len(),
        "cache warm complete"
    );

    Ok(())
}
