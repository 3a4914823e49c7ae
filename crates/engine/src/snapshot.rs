//! `World` <-> `PersistedState` conversion and the undo stack (spec.md §6.2,
//! §4.8 steps 1/11, §5 "append-only, truncated on confirmed undo").

use std::collections::BTreeMap;

use outbreak_domain::{AreaId, World};
use outbreak_shared::persisted::{AreaSection, CharacterSection, ItemSection, LinkSection, WorldSection};
use outbreak_shared::{PersistedState, Snapshot, SnapshotMeta};

pub fn to_persisted(world: &World) -> PersistedState {
    let world_section = WorldSection {
        uid: world.uid,
        title: world.title.clone(),
        chaos_state: world.chaos_state,
        current_dilemma: world.current_dilemma.clone(),
        current_goal: world.current_goal.clone(),
        grid_map: world.grid_map.clone(),
    };

    let characters: BTreeMap<String, CharacterSection> = world
        .characters
        .iter()
        .map(|(id, c)| {
            (
                id.to_string(),
                CharacterSection {
                    uid: *id,
                    name: c.name.clone(),
                    description: c.description.clone(),
                    current_area: c.current_area,
                    health: c.health,
                    alive: c.alive,
                    controllable: c.controllable,
                    inventory: c.inventory.clone(),
                    equipment: c.equipment.clone(),
                    party: c.party.clone(),
                    friendships: c.friendships.clone(),
                    topics: c.topics.clone(),
                    state: c.state.clone(),
                    personality: c.personality,
                    stats: c.stats,
                },
            )
        })
        .collect();

    let items: BTreeMap<String, ItemSection> = world
        .items
        .iter()
        .map(|(id, i)| {
            (
                id.to_string(),
                ItemSection {
                    uid: *id,
                    name: i.name.clone(),
                    description: i.description.clone(),
                    damage: i.damage,
                    robustness: i.robustness,
                    placement: i.placement,
                    equipped: i.equipped,
                },
            )
        })
        .collect();

    let areas: BTreeMap<String, AreaSection> = world
        .areas
        .iter()
        .map(|(id, a)| {
            (
                id.to_string(),
                AreaSection {
                    uid: *id,
                    name: a.name.clone(),
                    description: a.description.clone(),
                    exit: a.exit,
                    key_items: a.key_items.clone(),
                    characters: a.characters.clone(),
                },
            )
        })
        .collect();

    let links: BTreeMap<String, LinkSection> = world
        .linking_points
        .iter()
        .map(|(id, l)| {
            (
                id.to_string(),
                LinkSection {
                    uid: *id,
                    description: l.description.clone(),
                    area_a: l.area_a,
                    area_b: l.area_b,
                    blocked: l.blocked,
                },
            )
        })
        .collect();

    PersistedState {
        world: world_section,
        characters,
        items,
        areas,
        links,
    }
}

/// Restores the world-visible, character-combat, and party/friendship state
/// of a snapshot (spec.md §6.2's named sections). Knowledge maps aren't part
/// of the persisted layout (spec.md §6.2 only names `world/characters/items/
/// areas/links`, matching the subset of §3's Character fields listed there)
/// so an undo leaves what each character currently remembers untouched.
pub fn apply_persisted(world: &mut World, state: &PersistedState) {
    world.title = state.world.title.clone();
    world.chaos_state = state.world.chaos_state;
    world.current_dilemma = state.world.current_dilemma.clone();
    world.current_goal = state.world.current_goal.clone();
    world.grid_map = state.world.grid_map.clone();

    for section in state.characters.values() {
        if let Some(c) = world.characters.get_mut(&section.uid) {
            c.name = section.name.clone();
            c.description = section.description.clone();
            c.current_area = section.current_area;
            c.health = section.health;
            c.alive = section.alive;
            c.controllable = section.controllable;
            c.inventory = section.inventory.clone();
            c.equipment = section.equipment.clone();
            c.party = section.party.clone();
            c.friendships = section.friendships.clone();
            c.topics = section.topics.clone();
            c.state = section.state.clone();
            c.personality = section.personality;
            c.stats = section.stats;
        }
    }
    for section in state.items.values() {
        if let Some(i) = world.items.get_mut(&section.uid) {
            i.name = section.name.clone();
            i.description = section.description.clone();
            i.damage = section.damage;
            i.robustness = section.robustness;
            i.placement = section.placement;
            i.equipped = section.equipped;
        }
    }
    for section in state.areas.values() {
        if let Some(a) = world.areas.get_mut(&section.uid) {
            a.name = section.name.clone();
            a.description = section.description.clone();
            a.exit = section.exit;
            a.key_items = section.key_items.clone();
            a.characters = section.characters.clone();
        }
    }
    for section in state.links.values() {
        if let Some(l) = world.linking_points.get_mut(&section.uid) {
            l.description = section.description.clone();
            l.area_a = section.area_a;
            l.area_b = section.area_b;
            l.blocked = section.blocked;
        }
    }
}

/// Pushes a new snapshot unless structurally identical to the top of the
/// stack (spec.md §4.8 step 11, §6.2 "equality for snapshot dedup is
/// structural").
pub fn push_snapshot(stack: &mut Vec<Snapshot>, world: &World, player_input: impl Into<String>, player_area: AreaId) {
    let state = to_persisted(world);
    if stack.last().is_some_and(|top| top.state == state) {
        return;
    }
    stack.push(Snapshot {
        state,
        meta: SnapshotMeta {
            player_input: player_input.into(),
            player_area,
        },
    });
}

/// Applies the 1-based snapshot at `index`, truncating the stack to that
/// length (spec.md §4.8 step 2, §5 "truncated on confirmed undo").
pub fn apply_snapshot_at(stack: &mut Vec<Snapshot>, world: &mut World, index: usize) -> bool {
    if index == 0 || index > stack.len() {
        return false;
    }
    apply_persisted(world, &stack[index - 1].state);
    stack.truncate(index);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character};

    #[test]
    fn identical_world_state_is_not_pushed_twice() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        world.add_character(Character::new("Lee", "desc", area));

        let mut stack = Vec::new();
        push_snapshot(&mut stack, &world, "look around", area);
        push_snapshot(&mut stack, &world, "look around again", area);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn undo_restores_health_and_truncates_stack() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let lee = world.add_character(Character::new("Lee", "desc", area));

        let mut stack = Vec::new();
        push_snapshot(&mut stack, &world, "(start)", area);

        if let Ok(c) = world.character_mut(lee) {
            c.health = 10;
        }
        push_snapshot(&mut stack, &world, "got hurt", area);
        assert_eq!(stack.len(), 2);

        assert!(apply_snapshot_at(&mut stack, &mut world, 1));
        assert_eq!(world.character(lee).unwrap().health, 100);
        assert_eq!(stack.len(), 1);
    }
}
