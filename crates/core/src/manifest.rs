//! Cache population manifests.
//!
//! Two ordered path lists drive install-time population and request
//! classification: the core shell (entry point plus fixed script/style
//! assets) and the sacred data set (large, rarely-changing reference JSON
//! documents). These are the only persisted configuration besides
//! [`crate::AppConfig`].

use serde::{Deserialize, Serialize};

/// The two cache population manifests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheManifests {
    /// Application shell: entry point and fixed assets. Small, fetched on
    /// every install.
    #[serde(default = "default_core_shell")]
    pub core_shell: Vec<String>,

    /// Reference-data documents, one per knowledge-base JSON file.
    #[serde(default = "default_sacred_data")]
    pub sacred_data: Vec<String>,
}

fn default_core_shell() -> Vec<String> {
    [
        "/",
        "/index.html",
        "/styles.css",
        "/app.js",
        "/manifest.json",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_sacred_data() -> Vec<String> {
    [
        "/lighthouse/lighthouse_master_index.json",
        "/lighthouse/traditions/enochian_magic.json",
        "/lighthouse/traditions/hermetic_qabalah.json",
        "/lighthouse/traditions/golden_dawn.json",
        "/lighthouse/traditions/thelema.json",
        "/lighthouse/traditions/chaos_magic.json",
        "/lighthouse/traditions/alchemy.json",
        "/lighthouse/traditions/tarot.json",
        "/lighthouse/traditions/astrology.json",
        "/lighthouse/traditions/gnosticism.json",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for CacheManifests {
    fn default() -> Self {
        Self { core_shell: default_core_shell(), sacred_data: default_sacred_data() }
    }
}

impl CacheManifests {
    pub fn is_core_shell(&self, path: &str) -> bool {
        self.core_shell.iter().any(|p| p == path)
    }

    pub fn is_sacred_data(&self, path: &str) -> bool {
        self.sacred_data.iter().any(|p| p == path)
    }

    /// Every manifested path, shell first, in manifest order.
    pub fn all_paths(&self) -> impl Iterator<Item = &str> {
        self.core_shell
            .iter()
            .chain(self.sacred_data.iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_membership() {
        let m = CacheManifests::default();
        assert!(m.is_core_shell("/"));
        assert!(m.is_core_shell("/index.html"));
        assert!(!m.is_core_shell("/lighthouse/traditions/thelema.json"));
        assert!(m.is_sacred_data("/lighthouse/traditions/thelema.json"));
        assert!(!m.is_sacred_data("/app.js"));
    }

    #[test]
    fn test_all_paths_order() {
        let m = CacheManifests {
            core_shell: vec!["/".to_string()],
            sacred_data: vec!["/data.json".to_string()],
        };
        let paths: Vec<&str> = m.all_paths().collect();
        assert_eq!(paths, vec!["/", "/data.json"]);
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let m: CacheManifests = serde_json::from_str(r#"{"core_shell": ["/"]}"#).unwrap();
        assert_eq!(m.core_shell, vec!["/".to_string()]);
        assert!(!m.sacred_data.is_empty());
    }
}
