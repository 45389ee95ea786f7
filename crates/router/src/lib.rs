//! Offline cache router.
//!
//! Intercepts GET requests, classifies each into one of five route classes,
//! and serves it by combining the persistent cache store with network
//! fetches, applying a different freshness/consistency trade-off per class.
//! A lifecycle manager handles versioned cache generations: install
//! populates them from the manifests, activate garbage-collects superseded
//! generations and claims control.

pub mod classify;
pub mod fallback;
pub mod lifecycle;
pub mod notify;
pub mod router;
pub mod strategies;
pub mod sync;

#[cfg(test)]
pub(crate) mod testutil;

pub use classify::RouteClass;
pub use lifecycle::{GenerationNames, InstallReport};
pub use router::{RouteOutcome, Router, StrategyTimeouts};
