//! Intent parser port (spec.md §4.6/§6.1: "text, world_view) -> actions[]").

use async_trait::async_trait;
use outbreak_shared::{RawAction, WorldView};

/// Parses free-form text into zero or more actions, resolved against a
/// read-only world projection (spec.md §4.1 parser output contract). A
/// failing or empty parse is fail-open to a single `do_nothing` step
/// (spec.md §5) — the pipeline applies that fallback, not this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntentParserPort: Send + Sync {
    async fn parse(&self, text: &str, world_view: &WorldView) -> Vec<RawAction>;
}
