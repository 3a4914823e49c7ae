//! Undo selector port (spec.md §4.8 step 2/5, §6.1: "(text, snapshots) -> k").

use async_trait::async_trait;
use outbreak_shared::Snapshot;

/// Picks a past snapshot index (1-based) to revert to, or 0 to cancel.
/// Out-of-range results are clamped to the nearest valid index by the
/// pipeline, not this port (spec.md §6.1).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UndoSelectorPort: Send + Sync {
    async fn select(&self, text: &str, snapshots: &[Snapshot]) -> usize;
}
