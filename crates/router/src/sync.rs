//! Background synchronization collaborator interfaces.
//!
//! Two named sync tags exist: quest progress and inscription submissions.
//! The persistent queue and the remote push transport are external
//! collaborators behind traits; this module only drives a batch, isolating
//! per-item failures so one bad item never fails the rest. No retry or
//! backoff policy is defined here; a failed item stays pending for the
//! next batch.

use async_trait::async_trait;
use lantern_core::Error;
use serde::{Deserialize, Serialize};

/// Sync tag for pending quest progress.
pub const QUEST_SYNC: &str = "quest-sync";
/// Sync tag for pending inscription submissions.
pub const INSCRIPTION_SYNC: &str = "inscription-sync";

/// An item awaiting background synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingSyncItem {
    pub id: String,
    pub tag: String,
    pub payload: serde_json::Value,
}

/// Persistent queue of items awaiting synchronization.
#[async_trait]
pub trait SyncQueue: Send + Sync {
    /// Items pending for a tag, oldest first.
    async fn pending(&self, tag: &str) -> Result<Vec<PendingSyncItem>, Error>;

    /// Record that an item reached the remote system.
    async fn mark_synced(&self, id: &str) -> Result<(), Error>;
}

/// Remote push transport.
#[async_trait]
pub trait SyncTransport: Send + Sync {
    async fn push(&self, item: &PendingSyncItem) -> Result<(), Error>;
}

/// Outcome of one sync batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub attempted: usize,
    pub synced: usize,
    pub failed: usize,
}

/// Drive one batch for a tag: push every pending item, marking successes
/// and logging failures without aborting the batch.
pub async fn run_sync(tag: &str, queue: &dyn SyncQueue, transport: &dyn SyncTransport) -> Result<SyncReport, Error> {
    let items = queue.pending(tag).await?;
    let mut report = SyncReport { attempted: items.len(), synced: 0, failed: 0 };

    for item in &items {
        match transport.push(item).await {
            Ok(()) => match queue.mark_synced(&item.id).await {
                Ok(()) => report.synced += 1,
                Err(e) => {
                    tracing::warn!(tag = %tag, id = %item.id, error = %e, "pushed but failed to mark synced");
                    report.failed += 1;
                }
            },
            Err(e) => {
                tracing::warn!(tag = %tag, id = %item.id, error = %e, "sync push failed, item stays pending");
                report.failed += 1;
            }
        }
    }

    tracing::info!(tag = %tag, attempted = report.attempted, synced = report.synced, failed = report.failed, "sync batch complete");
    Ok(report)
}
