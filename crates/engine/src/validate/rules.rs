//! Per-kind validation rules (spec.md §4.3). Returns `None` on success or a
//! single blocking-reason sentence, normalized so it ends with `.`, `!`, or
//! `?` (spec.md §4.3 "polite phrasing").

use outbreak_domain::entities::item::ItemPlacement;
use outbreak_domain::World;
use outbreak_shared::{ActionEnvelope, ActionKind};

use crate::events::EventManager;
use crate::resolve::{is_co_present, resolve_subject};

fn normalize(reason: impl Into<String>) -> String {
    let mut reason = reason.into();
    if !matches!(reason.chars().last(), Some('.') | Some('!') | Some('?')) {
        reason.push('.');
    }
    reason
}

fn co_present_or_partied(actor: outbreak_domain::CharacterId, target: outbreak_domain::CharacterId, world: &World) -> bool {
    is_co_present(actor, target, world)
        || world
            .characters
            .get(&actor)
            .map(|c| c.is_in_party_with(target))
            .unwrap_or(false)
}

/// Validates one resolved action against the live world. `allow_dead_target`
/// lets `harm`/`steal` corpse-search paths bypass the "target alive" rule
/// where the spec permits it (spec.md §4.3): `harm` itself never does,
/// `steal` and `search` do.
pub fn validate_single(action: &ActionEnvelope, world: &World, events: &EventManager) -> Option<String> {
    match action.kind {
        ActionKind::Move => validate_move(action, world),
        ActionKind::Talk | ActionKind::Inform => validate_co_present_target(action, world, "talk to"),
        ActionKind::Harm => validate_harm(action, world),
        ActionKind::Steal => validate_steal(action, world),
        ActionKind::GiveItem => validate_give_item(action, world),
        ActionKind::JoinParty | ActionKind::QuitParty => {
            validate_co_present_target(action, world, "reach")
        }
        ActionKind::PickUp => validate_pick_up(action, world),
        ActionKind::UseItem => validate_use_item(action, world),
        ActionKind::EquipItem => validate_equip_item(action, world),
        ActionKind::UnequipItem => validate_unequip_item(action, world),
        ActionKind::Search => validate_search(action, world),
        ActionKind::AskAction => validate_ask_action(action, world),
        ActionKind::StopEvent => validate_stop_event(action, world, events),
        ActionKind::DropItem => validate_drop_item(action, world),
        ActionKind::DoNothing | ActionKind::Examine => None,
    }
}

fn validate_move(action: &ActionEnvelope, world: &World) -> Option<String> {
    let destination = action.location?;
    if world.area(destination).is_err() {
        return Some(normalize("That place doesn't exist"));
    }
    None
}

fn validate_co_present_target(action: &ActionEnvelope, world: &World, verb: &str) -> Option<String> {
    let target = action.target?;
    if world.character(target).is_err() {
        return Some(normalize(format!("There's no one here to {verb}")));
    }
    if !co_present_or_partied(action.actor, target, world) {
        return Some(normalize(format!("They're too far away to {verb}")));
    }
    None
}

fn validate_harm(action: &ActionEnvelope, world: &World) -> Option<String> {
    let target = action.target?;
    let Ok(victim) = world.character(target) else {
        return Some(normalize("There's no one here to harm"));
    };
    if !victim.alive {
        return Some(normalize("They're already dead"));
    }
    if !co_present_or_partied(action.actor, target, world) {
        return Some(normalize("They're too far away to harm"));
    }
    None
}

fn validate_steal(action: &ActionEnvelope, world: &World) -> Option<String> {
    let target = action.target?;
    if world.character(target).is_err() {
        return Some(normalize("There's no one here to steal from"));
    }
    if !co_present_or_partied(action.actor, target, world) {
        return Some(normalize("They're too far away to steal from"));
    }
    let Some(item) = action.item else {
        return Some(normalize("What do you want to steal"));
    };
    let Ok(item_ref) = world.item(item) else {
        return Some(normalize("That item doesn't exist"));
    };
    if item_ref.holder() != Some(target) {
        return Some(normalize("They don't have that"));
    }
    None
}

fn validate_give_item(action: &ActionEnvelope, world: &World) -> Option<String> {
    if let Some(reason) = validate_co_present_target(action, world, "give anything to") {
        return Some(reason);
    }
    let Some(item) = action.item else {
        return Some(normalize("What do you want to give"));
    };
    match world.item(item) {
        Ok(item_ref) if item_ref.holder() == Some(action.actor) => None,
        Ok(_) => Some(normalize("You don't have that")),
        Err(_) => Some(normalize("That item doesn't exist")),
    }
}

fn validate_pick_up(action: &ActionEnvelope, world: &World) -> Option<String> {
    let Some(item) = action.item else {
        return Some(normalize("What do you want to pick up"));
    };
    let Ok(actor) = world.character(action.actor) else {
        return Some(normalize("You aren't anywhere"));
    };
    let Ok(item_ref) = world.item(item) else {
        return Some(normalize("That item doesn't exist"));
    };
    if item_ref.floor_area() != Some(actor.current_area) {
        return Some(normalize("That isn't here"));
    }
    if !actor.knowledge.knows(outbreak_domain::knowledge::Known::Item(item)) {
        return Some(normalize("You don't know of anything like that here"));
    }
    None
}

fn validate_use_item(action: &ActionEnvelope, world: &World) -> Option<String> {
    let Some(item) = action.item else {
        return Some(normalize("What do you want to use"));
    };
    let Ok(actor) = world.character(action.actor) else {
        return Some(normalize("You aren't anywhere"));
    };
    if !actor.inventory.contains(&item) {
        return Some(normalize("You don't have that"));
    }
    if let Some(target) = action.target {
        if !co_present_or_partied(action.actor, target, world) {
            return Some(normalize("They're too far away"));
        }
    }
    None
}

fn validate_equip_item(action: &ActionEnvelope, world: &World) -> Option<String> {
    let Some(item) = action.item else {
        return Some(normalize("What do you want to equip"));
    };
    let Ok(actor) = world.character(action.actor) else {
        return Some(normalize("You aren't anywhere"));
    };
    if !actor.inventory.contains(&item) {
        return Some(normalize("You don't have that"));
    }
    None
}

fn validate_unequip_item(action: &ActionEnvelope, world: &World) -> Option<String> {
    let Some(item) = action.item else {
        return Some(normalize("What do you want to unequip"));
    };
    let Ok(actor) = world.character(action.actor) else {
        return Some(normalize("You aren't anywhere"));
    };
    if !actor.inventory.contains(&item) {
        return Some(normalize("You don't have that"));
    }
    if !actor.equipment.is_equipped(item) {
        return Some(normalize("That isn't equipped"));
    }
    None
}

fn validate_search(action: &ActionEnvelope, world: &World) -> Option<String> {
    if action.location.is_none() && action.target.is_none() {
        return Some(normalize("Search what"));
    }
    if let Some(target) = action.target {
        if world.character(target).is_err() {
            return Some(normalize("There's no one here to search"));
        }
        if !co_present_or_partied(action.actor, target, world) {
            return Some(normalize("They're too far away to search"));
        }
    }
    if let Some(location) = action.location {
        if world.area(location).is_err() {
            return Some(normalize("That place doesn't exist"));
        }
    }
    None
}

fn validate_ask_action(action: &ActionEnvelope, world: &World) -> Option<String> {
    let Some(asked) = action.target else {
        return Some(normalize("Ask whom"));
    };
    let Ok(asked_character) = world.character(asked) else {
        return Some(normalize("There's no one here to ask"));
    };
    if !asked_character.alive {
        return Some(normalize("They can't hear you anymore"));
    }
    if !co_present_or_partied(action.actor, asked, world) {
        return Some(normalize("They're too far away to ask"));
    }
    if action.requested_action.is_none() {
        return Some(normalize("Ask them to do what"));
    }
    None
}

fn validate_stop_event(action: &ActionEnvelope, world: &World, events: &EventManager) -> Option<String> {
    let Ok(actor) = world.character(action.actor) else {
        return Some(normalize("You aren't anywhere"));
    };
    let area = actor.current_area;
    let involved = events
        .active_events()
        .any(|e| e.location() == area && e.participants().contains(&action.actor));
    if !involved {
        return Some(normalize("There's nothing to stop"));
    }
    None
}

fn validate_drop_item(action: &ActionEnvelope, world: &World) -> Option<String> {
    let Some(item) = action.item else {
        return Some(normalize("What do you want to drop"));
    };
    let Ok(actor) = world.character(action.actor) else {
        return Some(normalize("You aren't anywhere"));
    };
    if !actor.inventory.contains(&item) {
        return Some(normalize("You don't have that"));
    }
    None
}

/// Used by the inform-unified executor to decide whether the subject still
/// resolves at execution time (spec.md §4.4 unified inform/talk handler).
pub fn subject_resolves(topic: &str, actor: outbreak_domain::CharacterId, world: &World) -> bool {
    resolve_subject(topic, actor, world).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character};
    use outbreak_shared::ActionKind;

    #[test]
    fn move_to_unknown_area_fails() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let actor = world.add_character(Character::new("Lee", "desc", area));
        let mut action = ActionEnvelope::new(actor, ActionKind::Move);
        action.location = Some(outbreak_domain::AreaId::new());
        let events = EventManager::new();
        let reason = validate_single(&action, &world, &events);
        assert!(reason.is_some());
        assert!(reason.unwrap().ends_with('.'));
    }

    #[test]
    fn harm_requires_alive_target() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let actor = world.add_character(Character::new("Lee", "desc", area));
        let victim = world.add_character(Character::new("Kenny", "desc", area).with_health(0));
        let mut action = ActionEnvelope::new(actor, ActionKind::Harm);
        action.target = Some(victim);
        let events = EventManager::new();
        assert!(validate_single(&action, &world, &events).is_some());
    }
}
