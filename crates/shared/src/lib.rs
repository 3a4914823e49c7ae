//! Vocabulary crossing the boundary between `outbreak-engine` and its NL
//! collaborators: action envelopes, the token grammar, the world view
//! handed to the intent parser, and the persisted-state document shape.

pub mod action;
pub mod persisted;
pub mod token;
pub mod world_view;

pub use action::{ActionEnvelope, ActionKind, RawAction};
pub use persisted::{PersistedState, Snapshot, SnapshotMeta};
pub use token::Token;
pub use world_view::{EntityRef, WorldView};
