//! Action execution (spec.md §4.4) and the per-actor turn state machine
//! (spec.md §4.4.1).

pub mod handlers;
pub mod state_machine;

pub use handlers::{execute_action, ExecutionOutcome};
pub use state_machine::ActorState;

use outbreak_domain::CharacterId;
use outbreak_shared::ActionEnvelope;

/// Tag recording who queued a step (spec.md §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOrigin {
    Player,
    GoodAi,
    EvilAi,
    GroupJoin,
    GroupMove,
}

/// One actor's planned action for the round, with provenance (spec.md §4.7).
#[derive(Debug, Clone)]
pub struct QueuedStep {
    pub actor: CharacterId,
    pub action: ActionEnvelope,
    pub origin: StepOrigin,
}
