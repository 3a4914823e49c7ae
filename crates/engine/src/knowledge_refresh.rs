//! Knowledge snapshot construction and refresh (spec.md §4.6).

use outbreak_domain::entities::item::ItemPlacement;
use outbreak_domain::knowledge::snapshot::{
    AreaSnapshot, CharacterRefSnapshot, CharacterSnapshot, EntitySnapshot, InventoryEntrySnapshot,
    ItemRefSnapshot, ItemSnapshot,
};
use outbreak_domain::knowledge::{KnowledgeEntry, KnowledgeReason, Known};
use outbreak_domain::{Area, Character, CharacterId, Item, ItemId, World};

pub fn item_snapshot(item: &Item) -> ItemSnapshot {
    ItemSnapshot {
        uid: item.uid,
        name: item.name.clone(),
        holder: item.holder(),
        position: item.floor_area(),
        equipped: item.equipped,
        equipped_slot: None,
        damage: item.damage,
        robustness: item.robustness,
        description: item.description.clone(),
        abilities: item.abilities.iter().map(|a| a.name.clone()).collect(),
    }
}

pub fn character_snapshot(character: &Character) -> CharacterSnapshot {
    CharacterSnapshot {
        uid: character.uid,
        name: character.name.clone(),
        health: character.health,
        alive: character.alive,
        current_area: character.current_area,
        equipped_slots: character.equipment.iter().collect(),
        stats: character.stats,
        personality: character.personality,
        inventory: character
            .inventory
            .iter()
            .map(|&item_id| InventoryEntrySnapshot {
                uid: item_id,
                name: String::new(),
                equipped: character.equipment.is_equipped(item_id),
            })
            .collect(),
        party: character.party.clone(),
    }
}

pub fn area_snapshot(world: &World, area: &Area) -> AreaSnapshot {
    AreaSnapshot {
        uid: area.uid,
        name: area.name.clone(),
        description: area.description.clone(),
        characters: area
            .characters
            .iter()
            .filter_map(|id| world.characters.get(id))
            .map(|c| CharacterRefSnapshot {
                uid: c.uid,
                name: c.name.clone(),
                alive: c.alive,
            })
            .collect(),
        floor_items: area
            .key_items
            .iter()
            .filter_map(|id| world.items.get(id))
            .map(|i| ItemRefSnapshot {
                uid: i.uid,
                name: i.name.clone(),
            })
            .collect(),
        linked_areas: world
            .neighbors(area.uid)
            .into_iter()
            .filter_map(|(other, link)| {
                world
                    .linking_point(link)
                    .ok()
                    .map(|l| (other, l.description.clone()))
            })
            .collect(),
    }
}

/// Records `reason` for `uid` in `observer`'s knowledge, per spec.md §4.6
/// `remember`: insert/update snapshot, mark known, and append the observer
/// to the entity's own `known_by` set.
pub fn remember_item(world: &mut World, observer: CharacterId, item: ItemId, reason: KnowledgeReason) {
    let Some(item_ref) = world.items.get(&item) else {
        return;
    };
    let name = item_ref.name.clone();
    let snapshot = EntitySnapshot::Item(item_snapshot(item_ref));
    if let Ok(observer_ref) = world.character_mut(observer) {
        observer_ref
            .knowledge
            .remember(KnowledgeEntry::new(Known::Item(item), name, reason, snapshot));
        observer_ref.known_items.insert(item);
    }
    if let Ok(item_mut) = world.item_mut(item) {
        item_mut.known_by.insert(observer);
    }
}

pub fn remember_character(
    world: &mut World,
    observer: CharacterId,
    subject: CharacterId,
    reason: KnowledgeReason,
) {
    if observer == subject {
        return;
    }
    let Some(subject_ref) = world.characters.get(&subject) else {
        return;
    };
    let name = subject_ref.name.clone();
    let snapshot = EntitySnapshot::Character(character_snapshot(subject_ref));
    if let Ok(observer_ref) = world.character_mut(observer) {
        observer_ref.knowledge.remember(KnowledgeEntry::new(
            Known::Character(subject),
            name,
            reason,
            snapshot,
        ));
        observer_ref.known_people.insert(subject);
    }
}

pub fn remember_area(world: &mut World, observer: CharacterId, area: outbreak_domain::AreaId, reason: KnowledgeReason) {
    let Some(area_ref) = world.areas.get(&area) else {
        return;
    };
    let name = area_ref.name.clone();
    let snapshot = EntitySnapshot::Area(area_snapshot(world, area_ref));
    if let Ok(observer_ref) = world.character_mut(observer) {
        observer_ref.knowledge.remember(KnowledgeEntry::new(
            Known::Area(area),
            name,
            reason,
            snapshot,
        ));
        observer_ref.known_areas.insert(area);
    }
    if let Ok(area_mut) = world.area_mut(area) {
        area_mut.known_by.insert(observer);
    }
}

/// `refresh_known_state` (spec.md §4.6): remembers own inventory, party,
/// current area, and all co-present characters and floor items.
pub fn refresh_known_state(world: &mut World, actor: CharacterId) {
    let Some(actor_ref) = world.characters.get(&actor) else {
        return;
    };
    let inventory = actor_ref.inventory.clone();
    let party = actor_ref.party.clone();
    let area_id = actor_ref.current_area;
    let co_present: Vec<CharacterId> = world
        .areas
        .get(&area_id)
        .map(|a| a.characters.iter().copied().filter(|c| *c != actor).collect())
        .unwrap_or_default();
    let floor_items: Vec<ItemId> = world
        .areas
        .get(&area_id)
        .map(|a| a.key_items.clone())
        .unwrap_or_default();

    for item in inventory {
        remember_item(world, actor, item, KnowledgeReason::Possession);
    }
    for partner in party {
        remember_character(world, actor, partner, KnowledgeReason::Party);
    }
    remember_area(world, actor, area_id, KnowledgeReason::Presence);
    for other in co_present {
        remember_character(world, actor, other, KnowledgeReason::CoPresent);
    }
    for item in floor_items {
        remember_item(world, actor, item, KnowledgeReason::InRoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area as DomainArea, Character as DomainCharacter, Item as DomainItem};

    #[test]
    fn refresh_known_state_remembers_co_present_characters_and_floor_items() {
        let mut world = World::new("Test");
        let area = world.add_area(DomainArea::new("Main Store", "desc", false));
        let lee = world.add_character(DomainCharacter::new("Lee", "desc", area));
        let kenny = world.add_character(DomainCharacter::new("Kenny", "desc", area));
        let axe = world.add_item_to_floor(DomainItem::new("Fire Axe", "sharp"), area);

        refresh_known_state(&mut world, lee);

        let lee_ref = world.character(lee).unwrap();
        assert!(lee_ref.knowledge.knows(Known::Character(kenny)));
        assert!(lee_ref.knowledge.knows(Known::Item(axe)));
        assert!(lee_ref.knowledge.knows(Known::Area(area)));
    }
}
