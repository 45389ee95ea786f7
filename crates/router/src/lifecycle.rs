//! Cache lifecycle manager.
//!
//! Two-phase handover between cache generations. Install populates the two
//! current generations from the manifests while a previous instance may
//! still be serving; activate is the only point where superseded
//! generations are destroyed and traffic is claimed. Deletion of stale
//! generations happens-before the claim, so no request can be served from
//! a generation mid-deletion.

use std::sync::Arc;
use std::time::Duration;

use lantern_client::{FetchRequest, Fetcher, fetch::resolve};
use lantern_core::cache::key::request_key;
use lantern_core::{CacheDb, CacheEntry, CacheManifests, Error};
use tokio::task::JoinSet;

/// The two current generation names.
#[derive(Debug, Clone)]
pub struct GenerationNames {
    pub shell: String,
    pub sacred: String,
}

impl GenerationNames {
    pub fn contains(&self, name: &str) -> bool {
        name == self.shell || name == self.sacred
    }
}

/// Outcome of a successful install.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub shell_entries: usize,
    pub sacred_entries: usize,
}

/// Populate both generations from the manifests, all-or-nothing.
///
/// Every manifested URL is fetched concurrently with a forced reload. If
/// any fetch fails or returns a non-2xx status the whole install fails and
/// nothing is written, so a previously-active instance keeps serving from
/// an intact generation. On success the caller may supersede the previous
/// instance immediately.
pub async fn install(
    store: &CacheDb, fetcher: Arc<dyn Fetcher>, manifests: &CacheManifests, names: &GenerationNames, origin: &str,
    timeout: Duration,
) -> Result<InstallReport, Error> {
    store.open_generation(&names.shell).await?;
    store.open_generation(&names.sacred).await?;

    let mut tasks: JoinSet<Result<(String, String, CacheEntry), Error>> = JoinSet::new();

    for (generation, path) in manifest_targets(manifests, names) {
        let url = resolve(origin, &path)
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))?
            .to_string();
        let fetcher = fetcher.clone();
        tasks.spawn(async move {
            let request = FetchRequest::new(url, timeout).reload();
            let response = fetcher.fetch(&request).await.map_err(|e| Error::InstallFailed(format!("{path}: {e}")))?;
            if !response.status.is_success() {
                return Err(Error::InstallFailed(format!("{path}: status {}", response.status.as_u16())));
            }
            let entry = CacheEntry {
                key: request_key("GET", &path),
                url: path.clone(),
                status: response.status.as_u16(),
                headers: response.header_pairs(),
                body: response.bytes.to_vec(),
                stored_at: chrono::Utc::now().to_rfc3339(),
            };
            Ok((generation, path, entry))
        });
    }

    // Fetch everything before writing anything: a failed install leaves the
    // store untouched.
    let mut fetched = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let result = joined.map_err(|e| Error::InstallFailed(format!("population task panicked: {e}")))?;
        fetched.push(result?);
    }

    let mut report = InstallReport { shell_entries: 0, sacred_entries: 0 };
    for (generation, path, entry) in fetched {
        store.put_entry(&generation, &entry).await?;
        tracing::debug!(generation = %generation, path = %path, "populated");
        if generation == names.shell {
            report.shell_entries += 1;
        } else {
            report.sacred_entries += 1;
        }
    }

    tracing::info!(
        shell = report.shell_entries,
        sacred = report.sacred_entries,
        "install complete, ready to supersede previous instance"
    );
    Ok(report)
}

/// Delete every generation not in the current pair, then claim control.
///
/// Returns the names that were deleted.
pub async fn activate(store: &CacheDb, names: &GenerationNames) -> Result<Vec<String>, Error> {
    let mut deleted = Vec::new();
    for name in store.list_generations().await? {
        if !names.contains(&name) {
            store.delete_generation(&name).await?;
            tracing::info!(generation = %name, "deleted superseded generation");
            deleted.push(name);
        }
    }

    // Cleanup happens-before the claim.
    tracing::info!(shell = %names.shell, sacred = %names.sacred, "claimed control of all clients");
    Ok(deleted)
}

fn manifest_targets(manifests: &CacheManifests, names: &GenerationNames) -> Vec<(String, String)> {
    let shell = manifests
        .core_shell
        .iter()
        .map(|p| (names.shell.clone(), p.clone()));
    let sacred = manifests
        .sacred_data
        .iter()
        .map(|p| (names.sacred.clone(), p.clone()));
    shell.chain(sacred).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeFetcher;
    use lantern_core::CacheDb;

    const ORIGIN: &str = "http://app.test";

    fn names() -> GenerationNames {
        GenerationNames { shell: "shell-v1".to_string(), sacred: "sacred-v1".to_string() }
    }

    fn small_manifests() -> CacheManifests {
        CacheManifests {
            core_shell: vec!["/".to_string(), "/app.js".to_string()],
            sacred_data: vec!["/lighthouse/traditions/thelema.json".to_string()],
        }
    }

    fn script_all(fetcher: &FakeFetcher) {
        fetcher.ok("http://app.test/", 200, "text/html", b"root");
        fetcher.ok("http://app.test/app.js", 200, "text/javascript", b"js");
        fetcher.ok(
            "http://app.test/lighthouse/traditions/thelema.json",
            200,
            "application/json",
            b"{}",
        );
    }

    #[tokio::test]
    async fn test_install_populates_both_generations() {
        let store = CacheDb::open_in_memory().await.unwrap();
        let fetcher = Arc::new(FakeFetcher::new());
        script_all(&fetcher);

        let report = install(&store, fetcher, &small_manifests(), &names(), ORIGIN, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(report.shell_entries, 2);
        assert_eq!(report.sacred_entries, 1);
        assert_eq!(store.count_entries("shell-v1").await.unwrap(), 2);
        assert_eq!(store.count_entries("sacred-v1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_install_is_all_or_nothing() {
        let store = CacheDb::open_in_memory().await.unwrap();
        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.ok("http://app.test/", 200, "text/html", b"root");
        fetcher.ok("http://app.test/app.js", 200, "text/javascript", b"js");
        fetcher.offline("http://app.test/lighthouse/traditions/thelema.json");

        let result = install(&store, fetcher, &small_manifests(), &names(), ORIGIN, Duration::from_secs(1)).await;

        assert!(matches!(result, Err(Error::InstallFailed(_))));
        assert_eq!(store.count_entries("shell-v1").await.unwrap(), 0);
        assert_eq!(store.count_entries("sacred-v1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_install_fails_on_non_success_status() {
        let store = CacheDb::open_in_memory().await.unwrap();
        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.ok("http://app.test/", 200, "text/html", b"root");
        fetcher.ok("http://app.test/app.js", 404, "text/plain", b"gone");
        fetcher.ok(
            "http://app.test/lighthouse/traditions/thelema.json",
            200,
            "application/json",
            b"{}",
        );

        let result = install(&store, fetcher, &small_manifests(), &names(), ORIGIN, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(Error::InstallFailed(_))));
    }

    #[tokio::test]
    async fn test_install_twice_is_idempotent() {
        let store = CacheDb::open_in_memory().await.unwrap();
        let fetcher = Arc::new(FakeFetcher::new());
        script_all(&fetcher);

        install(&store, fetcher.clone(), &small_manifests(), &names(), ORIGIN, Duration::from_secs(1))
            .await
            .unwrap();
        install(&store, fetcher, &small_manifests(), &names(), ORIGIN, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(store.count_entries("shell-v1").await.unwrap(), 2);
        assert_eq!(store.count_entries("sacred-v1").await.unwrap(), 1);
        let root = store
            .match_entry("shell-v1", &request_key("GET", "/"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(root.body, b"root");
    }

    #[tokio::test]
    async fn test_activate_deletes_superseded_generations() {
        let store = CacheDb::open_in_memory().await.unwrap();
        store.open_generation("shell-v0").await.unwrap();
        store.open_generation("sacred-v0").await.unwrap();
        store.open_generation("shell-v1").await.unwrap();
        store.open_generation("sacred-v1").await.unwrap();

        let deleted = activate(&store, &names()).await.unwrap();

        assert_eq!(deleted.len(), 2);
        let mut remaining = store.list_generations().await.unwrap();
        remaining.sort();
        assert_eq!(remaining, vec!["sacred-v1".to_string(), "shell-v1".to_string()]);
    }

    #[tokio::test]
    async fn test_activate_noop_when_clean() {
        let store = CacheDb::open_in_memory().await.unwrap();
        store.open_generation("shell-v1").await.unwrap();
        store.open_generation("sacred-v1").await.unwrap();

        let deleted = activate(&store, &names()).await.unwrap();
        assert!(deleted.is_empty());
    }
}
