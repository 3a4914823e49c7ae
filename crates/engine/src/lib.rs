//! Turn-based narrative engine: validates, executes, and narrates player
//! actions against a `World` (spec.md overview), deferring every piece of
//! natural-language understanding to the collaborator ports in [`ports`].

pub mod config;
pub mod error;
pub mod events;
pub mod execute;
pub mod knowledge_refresh;
pub mod logging;
pub mod parser_contract;
pub mod pipeline;
pub mod ports;
pub mod resolve;
pub mod session;
pub mod snapshot;
pub mod turn_handler;
pub mod validate;
pub mod win_loss;

#[cfg(test)]
mod scenario_tests;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use pipeline::{run_turn, Collaborators};
pub use session::{GameSession, PendingState};
pub use win_loss::Outcome;
