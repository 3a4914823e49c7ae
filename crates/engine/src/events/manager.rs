//! `EventManager` (spec.md §4.5): coordinates event lifecycle, movement
//! gating, and item-use reactions across the world's active events.

use outbreak_domain::{AreaId, CharacterId, World};
use outbreak_shared::ActionKind;

use super::{BlockadeEvent, Event, FightEvent};

#[derive(Default)]
pub struct EventManager {
    events: Vec<Box<dyn Event>>,
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("event_count", &self.events.len())
            .finish()
    }
}

impl EventManager {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: Box<dyn Event>) {
        self.events.push(event);
    }

    pub fn active_events(&self) -> impl Iterator<Item = &dyn Event> {
        self.events.iter().filter(|e| e.is_active()).map(|e| e.as_ref())
    }

    fn active_events_in(&self, area: AreaId) -> impl Iterator<Item = &dyn Event> {
        self.events
            .iter()
            .filter(move |e| e.is_active() && e.location() == area)
            .map(|e| e.as_ref())
    }

    fn active_fight_in(&self, area: AreaId) -> bool {
        self.active_events_in(area).any(|e| e.name() == "Fight")
    }

    /// Resolves stale fights, then spawns a new one if a hostile NPC is now
    /// co-located with `actor` (spec.md §4.5).
    pub fn check_for_event_triggers_after_action(&mut self, actor: CharacterId, world: &World) {
        for event in self.events.iter_mut() {
            event.resolve_if_needed(world);
        }
        self.events.retain(|e| e.is_active());

        let Some(actor_ref) = world.characters.get(&actor) else {
            return;
        };
        let area = actor_ref.current_area;
        if self.active_fight_in(area) {
            return;
        }
        let Some(area_ref) = world.areas.get(&area) else {
            return;
        };
        let hostile_present = area_ref.characters.iter().any(|&other_id| {
            other_id != actor
                && world
                    .characters
                    .get(&other_id)
                    .map(|other| {
                        other.alive
                            && (actor_ref.is_hostile_toward(other) || other.is_hostile_toward(actor_ref))
                    })
                    .unwrap_or(false)
        });
        if hostile_present {
            self.push(Box::new(FightEvent::new(area, vec![actor])));
        }
    }

    /// First blocking description from an active blockade on this edge, or
    /// `None` if open (spec.md §4.5).
    pub fn validate_movement(&self, from: AreaId, to: AreaId) -> Option<String> {
        self.active_events()
            .find_map(|event| event.validate_movement(from, to))
    }

    /// Dispatches `use_item` to every active event in `actor`'s area,
    /// concatenating non-empty responses (spec.md §4.5 `handle_item_use`).
    pub fn handle_item_use(&mut self, actor: CharacterId, item_name: &str, world: &mut World) -> String {
        let Some(area) = world.characters.get(&actor).map(|c| c.current_area) else {
            return String::new();
        };
        let mut responses = Vec::new();
        for event in self.events.iter_mut() {
            if !event.is_active() || event.location() != area {
                continue;
            }
            if let Some(text) = event.handle_action(
                ActionKind::UseItem,
                &[item_name.to_string()],
                actor,
                world,
            ) {
                responses.push(text);
            }
        }
        responses.join(" ")
    }

    /// Ensures a non-blocking `FightEvent` exists in `area` including every
    /// id in `participants` (spec.md §4.4 "Ensure a FightEvent exists").
    /// Adds missing participants to an existing active fight rather than
    /// spawning a duplicate.
    pub fn ensure_fight(&mut self, area: AreaId, participants: &[CharacterId]) {
        for event in self.events.iter_mut() {
            if event.is_active() && event.location() == area && event.name() == "Fight" {
                for &who in participants {
                    event.add_participant(who);
                }
                return;
            }
        }
        self.push(Box::new(FightEvent::new(area, participants.to_vec())));
    }

    /// Resolves the active event in `area` that `actor` participates in, if
    /// any (spec.md §4.4 `stop_event`: "delegates to the active event's
    /// resolution method"). Returns the event's own name for the caller to
    /// narrate; `None` means nothing here involves `actor`.
    pub fn resolve_event_for(&mut self, actor: CharacterId, area: AreaId) -> Option<String> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.is_active() && e.location() == area && e.participants().contains(&actor))?;
        let name = event.name().to_string();
        event.resolve();
        Some(name)
    }

    /// Seeds the reference scenario's barricaded-door blockade (SPEC_FULL.md
    /// §C.1); callers wire scenario-specific blockades this way rather than
    /// through a generic world-scanning `initialize_events`, since the
    /// engine has no reflection-based entity discovery (spec.md §9).
    pub fn seed_blockade(&mut self, blockade: BlockadeEvent) {
        self.push(Box::new(blockade));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character};

    #[test]
    fn spawns_fight_when_hostile_co_located() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Front Entrance", "desc", false));
        let mut lee = Character::new("Lee", "desc", area);
        lee.controllable = true;
        let lee = world.add_character(lee);
        let mut zombie = Character::new("Zombie", "desc", area);
        zombie.hostile = true;
        world.add_character(zombie);

        let mut manager = EventManager::new();
        manager.check_for_event_triggers_after_action(lee, &world);
        assert!(manager.active_events_in(area).any(|e| e.name() == "Fight"));
    }

    #[test]
    fn does_not_duplicate_an_already_active_fight() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Front Entrance", "desc", false));
        let lee = world.add_character(Character::new("Lee", "desc", area));
        let mut zombie = Character::new("Zombie", "desc", area);
        zombie.hostile = true;
        let zombie = world.add_character(zombie);

        let mut manager = EventManager::new();
        manager.push(Box::new(FightEvent::new(area, vec![lee, zombie])));
        manager.check_for_event_triggers_after_action(lee, &world);
        assert_eq!(manager.active_events_in(area).count(), 1);
    }
}
