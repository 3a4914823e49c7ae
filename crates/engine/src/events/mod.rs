//! In-world events (spec.md §4.5), grounded on the teacher's event-as-port
//! shape (`event_bus_port.rs`) but adapted: these are simulation-internal
//! state machines, not a pub/sub bus. Replaces the source prototype's
//! `isinstance(event, FightEvent)`-style dispatch (spec.md §9) with a small
//! `Event` trait concrete events implement.

mod blockade;
mod conversation;
mod fight;
mod manager;

pub use blockade::BlockadeEvent;
pub use conversation::{ConversationEvent, ConversationPhase};
pub use fight::FightEvent;
pub use manager::EventManager;

use outbreak_domain::{AreaId, CharacterId, EventId, World};
use outbreak_shared::ActionKind;

/// Common event interface (spec.md §9): `is_active_allowed`, `handle_action`,
/// `resolve_if_needed`, `resolve`. `validate_movement` is an additional hook
/// only `BlockadeEvent` overrides, avoiding an `isinstance`-equivalent
/// downcast when the turn handler asks "is this edge gated?".
pub trait Event: std::fmt::Debug + Send + Sync {
    fn id(&self) -> EventId;
    fn name(&self) -> &str;
    fn location(&self) -> AreaId;
    fn participants(&self) -> &[CharacterId];
    fn is_active(&self) -> bool;

    /// Whether `kind` may proceed while this event is active. Fights are
    /// non-blocking (spec.md §4.5: "all actions allowed"); only blockades
    /// restrict anything, and they restrict `move` via `validate_movement`
    /// rather than this hook.
    fn is_active_allowed(&self, _kind: ActionKind) -> bool {
        true
    }

    /// Offers this event a chance to react to an action (spec.md §4.4
    /// `use_item`: "offer the item to each active event ... via
    /// `handle_action`"). Returns `Some(text)` if the event produced a
    /// narration fragment.
    fn handle_action(
        &mut self,
        _kind: ActionKind,
        _args: &[String],
        _actor: CharacterId,
        _world: &mut World,
    ) -> Option<String> {
        None
    }

    /// Resolves the event if its end condition now holds.
    fn resolve_if_needed(&mut self, world: &World);

    fn resolve(&mut self);

    /// Adds a participant if this event kind tracks them (spec.md §4.4
    /// "ensure a FightEvent exists ... including attacker and victim").
    /// A no-op default lets the manager call this uniformly across event
    /// kinds instead of downcasting to `FightEvent` specifically.
    fn add_participant(&mut self, _who: CharacterId) {}

    /// Blockade-only: `None` if the edge is open, `Some(reason)` if gated
    /// (spec.md §4.5 `validate_movement`).
    fn validate_movement(&self, _from: AreaId, _to: AreaId) -> Option<String> {
        None
    }
}
