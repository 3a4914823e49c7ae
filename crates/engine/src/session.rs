//! `GameSession` (spec.md §9 "encapsulate module-level mutable globals"):
//! the world, event manager, turn handler, undo stack, and pending
//! confirmation state threaded through the turn pipeline, constructed once
//! at init rather than held in process-wide statics.

use outbreak_domain::{CharacterId, World};
use outbreak_shared::{ActionEnvelope, Snapshot};

use crate::config::EngineConfig;
use crate::events::EventManager;
use crate::turn_handler::TurnHandler;

/// A confirmation or correction flow awaiting the player's next reply
/// (spec.md §4.8 steps 2-4, §7.2).
#[derive(Debug, Clone)]
pub enum PendingState {
    None,
    /// A single action in a parsed sequence failed validation; the next
    /// input is expected to supply the missing detail (spec.md §7.2).
    Correction {
        actions: Vec<ActionEnvelope>,
        failed_index: usize,
        original_input: String,
    },
    /// The first action of a parsed sequence matched a risky pattern
    /// (spec.md §4.8 step 7); replayed verbatim on confirmation.
    RiskyConfirmation {
        actions: Vec<ActionEnvelope>,
        original_input: String,
    },
    /// The Undo Selector picked snapshot `index`; applied on confirmation
    /// (spec.md §4.8 step 5 `undo`).
    UndoConfirmation { index: usize },
}

impl Default for PendingState {
    fn default() -> Self {
        PendingState::None
    }
}

pub struct GameSession {
    pub world: World,
    pub events: EventManager,
    pub turn_handler: TurnHandler,
    pub config: EngineConfig,
    pub undo_stack: Vec<Snapshot>,
    pub pending: PendingState,
    pub player: CharacterId,
    /// The NPC whose health crossing `config.npc_win_health_threshold`
    /// wins the game (spec.md §4.8 step 13); scenario-specific, set at
    /// construction.
    pub win_npc: Option<CharacterId>,
    /// Counts completed (storytelling-reaching) turns, for the every-other-
    /// turn suggestion cadence (spec.md §4.8 step 12, §9 open question:
    /// "increments only on turns that reach storytelling").
    pub completed_turns: u32,
}

impl GameSession {
    pub fn new(world: World, config: EngineConfig, player: CharacterId, win_npc: Option<CharacterId>) -> Self {
        Self {
            world,
            events: EventManager::new(),
            turn_handler: TurnHandler::new(),
            config,
            undo_stack: Vec::new(),
            pending: PendingState::None,
            player,
            win_npc,
            completed_turns: 0,
        }
    }

    pub fn clear_pending(&mut self) {
        self.pending = PendingState::None;
    }
}
