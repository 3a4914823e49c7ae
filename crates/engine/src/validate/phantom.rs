//! Chain validation via phantom state (spec.md §4.3.1).
//!
//! Rather than hand-rolling a snapshot/restore of just the affected fields,
//! this validates each step against a cloned `World` and discards the
//! clone afterward — the real world is never touched, which trivially
//! satisfies the "chain validation purity" property (spec.md §8) without a
//! bespoke diff/undo mechanism.

use outbreak_domain::{CharacterId, World};
use outbreak_shared::{ActionEnvelope, ActionKind};

use crate::events::EventManager;

use super::rules::validate_single;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainValidationError {
    /// 1-based index of the failing step (spec.md §4.3.1).
    pub index: usize,
    pub reason: String,
}

impl ChainValidationError {
    /// Message prefixed `Action <k>:` (spec.md §4.3.1).
    pub fn message(&self) -> String {
        format!("Action {}: {}", self.index, self.reason)
    }
}

/// Validates a multi-action sequence, applying each step's approximate
/// effect to a scratch clone before validating the next (spec.md §4.3.1).
/// Returns the first failure, or `Ok(())` if every step validates.
pub fn validate_sequence(
    actions: &[ActionEnvelope],
    world: &World,
    events: &EventManager,
) -> Result<(), ChainValidationError> {
    let mut phantom = world.clone();

    for (i, action) in actions.iter().enumerate() {
        let effective_actor = effective_actor(action);
        let resolved = resolved_for_phantom_actor(action, effective_actor);

        if let Some(reason) = validate_single(&resolved, &phantom, events) {
            return Err(ChainValidationError {
                index: i + 1,
                reason,
            });
        }
        apply_approximate_effect(&resolved, &mut phantom);
    }

    Ok(())
}

/// `ask_action` validates/applies as if the asked character were the actor
/// (spec.md §4.3 "recursive validation with actor = asked character").
fn effective_actor(action: &ActionEnvelope) -> CharacterId {
    if action.kind == ActionKind::AskAction {
        action.target.unwrap_or(action.actor)
    } else {
        action.actor
    }
}

fn resolved_for_phantom_actor(action: &ActionEnvelope, actor: CharacterId) -> ActionEnvelope {
    if action.kind == ActionKind::AskAction {
        let mut requested = action.clone();
        requested.actor = actor;
        requested.kind = action.requested_action.unwrap_or(ActionKind::DoNothing);
        requested
    } else {
        action.clone()
    }
}

/// Mutates `phantom` per spec.md §4.3.1's effect list. Only move, pick_up,
/// drop_item, give_item, steal, join_party, and quit_party have a simulated
/// effect; everything else is a no-op for validation purposes.
fn apply_approximate_effect(action: &ActionEnvelope, phantom: &mut World) {
    match action.kind {
        ActionKind::Move => {
            if let (Ok(actor), Some(dest)) = (phantom.character_mut(action.actor), action.location)
            {
                actor.current_area = dest;
            }
        }
        ActionKind::PickUp => {
            if let Some(item) = action.item {
                if let Ok(actor) = phantom.character_mut(action.actor) {
                    actor.add_item(item);
                }
                if let Ok(item_ref) = phantom.item_mut(item) {
                    item_ref.placement = outbreak_domain::entities::item::ItemPlacement::Held(
                        action.actor,
                    );
                }
            }
        }
        ActionKind::DropItem => {
            if let Some(item) = action.item {
                let area = phantom.character(action.actor).map(|c| c.current_area).ok();
                if let Ok(actor) = phantom.character_mut(action.actor) {
                    actor.remove_item(item);
                }
                if let (Ok(item_ref), Some(area)) = (phantom.item_mut(item), area) {
                    item_ref.placement = outbreak_domain::entities::item::ItemPlacement::Floor(area);
                }
            }
        }
        ActionKind::GiveItem => {
            if let (Some(item), Some(recipient)) = (action.item, action.target) {
                if let Ok(actor) = phantom.character_mut(action.actor) {
                    actor.remove_item(item);
                }
                if let Ok(recipient_ref) = phantom.character_mut(recipient) {
                    recipient_ref.add_item(item);
                }
                if let Ok(item_ref) = phantom.item_mut(item) {
                    item_ref.placement = outbreak_domain::entities::item::ItemPlacement::Held(recipient);
                }
            }
        }
        ActionKind::Steal => {
            if let (Some(item), Some(victim)) = (action.item, action.target) {
                if let Ok(victim_ref) = phantom.character_mut(victim) {
                    victim_ref.remove_item(item);
                }
                if let Ok(actor) = phantom.character_mut(action.actor) {
                    actor.add_item(item);
                }
                if let Ok(item_ref) = phantom.item_mut(item) {
                    item_ref.placement = outbreak_domain::entities::item::ItemPlacement::Held(action.actor);
                }
            }
        }
        ActionKind::JoinParty => {
            if let Some(other) = action.target {
                if let Ok(actor) = phantom.character_mut(action.actor) {
                    actor.join_party(other);
                }
                if let Ok(other_ref) = phantom.character_mut(other) {
                    other_ref.join_party(action.actor);
                }
            }
        }
        ActionKind::QuitParty => {
            if let Some(other) = action.target {
                if let Ok(actor) = phantom.character_mut(action.actor) {
                    actor.leave_party(other);
                }
                if let Ok(other_ref) = phantom.character_mut(other) {
                    other_ref.leave_party(action.actor);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character, Item};

    #[test]
    fn pick_up_then_drop_validates_as_a_chain() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let actor = world.add_character(Character::new("Lee", "desc", area));
        let axe = world.add_item_to_floor(Item::new("Fire Axe", "sharp"), area);

        let mut pick_up = ActionEnvelope::new(actor, ActionKind::PickUp);
        pick_up.item = Some(axe);
        let mut drop = ActionEnvelope::new(actor, ActionKind::DropItem);
        drop.item = Some(axe);

        let events = EventManager::new();
        assert!(validate_sequence(&[pick_up, drop], &world, &events).is_ok());
        // original world untouched: axe is still on the floor, not in inventory.
        assert_eq!(world.item(axe).unwrap().floor_area(), Some(area));
    }

    #[test]
    fn second_step_failure_is_reported_with_one_based_index() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let actor = world.add_character(Character::new("Lee", "desc", area));

        let do_nothing = ActionEnvelope::new(actor, ActionKind::DoNothing);
        let mut move_nowhere = ActionEnvelope::new(actor, ActionKind::Move);
        move_nowhere.location = Some(outbreak_domain::AreaId::new());

        let events = EventManager::new();
        let err = validate_sequence(&[do_nothing, move_nowhere], &world, &events).unwrap_err();
        assert_eq!(err.index, 2);
        assert!(err.message().starts_with("Action 2:"));
    }
}
