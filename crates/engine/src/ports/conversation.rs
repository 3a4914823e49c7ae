//! Conversation responder port (spec.md §4.8 step 5, §6.1).

use async_trait::async_trait;

/// Extra context the pipeline passes alongside the raw label (spec.md §6.1
/// "extras?"): the world view for entity-constrained replies and, for the
/// every-other-turn suggestion (spec.md §4.8 step 12), a hint that this call
/// should produce a concrete next-step suggestion instead of a reply.
#[derive(Debug, Clone, Default)]
pub struct ConversationExtras {
    pub world_view: Option<outbreak_shared::WorldView>,
    pub suggestion_mode: bool,
}

/// Produces a short reply (spec.md §6.1: "≤2 sentences, constrained to known
/// entities only"); an empty string signals rejection after internal
/// retries, which the pipeline falls back from (spec.md §4.8 step 5).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationPort: Send + Sync {
    async fn respond(
        &self,
        text: &str,
        label: Option<&str>,
        extras: &ConversationExtras,
    ) -> String;
}
