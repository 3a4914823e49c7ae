//! Storytelling narrator port (spec.md §4.8 step 12, §6.1).

use async_trait::async_trait;

/// Produces second-person narration from the raw executor result (spec.md
/// §6.1: "must not contain the player's true character name; ≤1 sentence or
/// ≤70 words"). The pipeline applies the name-scrub and the up-to-3-attempt
/// retry loop with `OutputValidatorPort`; this port just generates text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorytellingPort: Send + Sync {
    async fn narrate(
        &self,
        player_input: &str,
        recognized_action: &str,
        world_result: &str,
    ) -> String;
}
