//! Reference scenario (SPEC_FULL.md §C.1), grounded on
//! `original_source/Dnd tryout user testing/gameSetup.py`'s "Drugstore in
//! Macon" world. Used by engine tests and the §8 worked scenarios; not
//! required by any single spec invariant, but is the cheapest way to keep
//! those scenarios exercisable end-to-end.

use crate::entities::ability::{names, Ability};
use crate::entities::item::ItemPlacement;
use crate::entities::{Area, Character, Gender, Item};
use crate::value_objects::{CombatStats, EquipmentSlot, Personality};
use crate::world::World;
use crate::{AreaId, CharacterId, LinkingPointId};

pub struct DrugstoreScenario {
    pub world: World,
    pub main_store: AreaId,
    pub front_entrance: AreaId,
    pub storage_room: AreaId,
    pub pharmacy: AreaId,
    pub far_away: AreaId,
    pub door_to_pharmacy: LinkingPointId,
    pub player: CharacterId,
    pub clementine: CharacterId,
    pub kenny: CharacterId,
    pub larry: CharacterId,
    pub zombies: Vec<CharacterId>,
}

pub fn drugstore_in_macon() -> DrugstoreScenario {
    let mut world = World::new("Drugstore in Macon");
    world.set_chaos_state(5);
    world.current_dilemma = "Surviving the zombie apocalypse.".into();
    world.current_goal = "Find medical supplies to save Larry.".into();

    let main_store = world.add_area(Area::new(
        "Main Store",
        "The main area of the drugstore, with shelves and counters.",
        false,
    ));
    let front_entrance = world.add_area(Area::new(
        "Front Entrance",
        "The area right outside the drugstore. We just ran away from there escaping the dead.",
        true,
    ));
    let storage_room = world.add_area(Area::new(
        "Storage Room",
        "A back room used for storing inventory, kept illuminated by a flickering light.",
        false,
    ));
    let pharmacy = world.add_area(Area::new(
        "Pharmacy",
        "A back area in which medical supplies were sold.",
        false,
    ));
    let far_away = world.add_area(Area::new("Far away", "Off the map.", true));

    world.link_areas(
        "Glass doors leading to the outside, covered in outdated sale posters.",
        main_store,
        front_entrance,
    );
    world.link_areas(
        "A door to the storage room, with a pool of blood in front of it.",
        main_store,
        storage_room,
    );
    let door_to_pharmacy =
        world.link_areas("A barricaded door blocking access to the pharmacy.", storage_room, pharmacy);

    let player = add_human(
        &mut world,
        "Lee Everett",
        "Protagonist, recently divorced and sent to prison.",
        main_store,
        true,
        Personality::new(6, 6, 5, 6, 4),
        CombatStats::new(6, 7, 6, 5, 6),
    );
    if let Ok(lee) = world.character_mut(player) {
        lee.state = "alert".into();
        lee.abilities.push(Ability::new(
            "Teacher",
            "Former history professor; better at explaining/informing.",
        ));
        lee.abilities.push(Ability::new(
            "Protective",
            "Tends to defend allies in danger.",
        ));
    }

    let clementine = add_human(
        &mut world,
        "Clementine",
        "Little 12-year-old girl, saved from her house in Atlanta.",
        main_store,
        false,
        Personality::new(5, 6, 2, 9, 5),
        CombatStats::new(2, 7, 4, 5, 4),
    );
    if let Ok(clem) = world.character_mut(clementine) {
        clem.topics = vec![
            "The location of her parents, they must be out there.".into(),
            "A little bit hungry".into(),
        ];
        clem.state = "scared".into();
        clem.abilities.push(Ability::new(
            "SmallAndSneaky",
            "Can access tight spaces; less noticeable.",
        ));
    }

    let kenny = add_human(
        &mut world,
        "Kenny",
        "Father of Duck, a fisherman and family man.",
        main_store,
        false,
        Personality::new(6, 4, 8, 4, 2),
        CombatStats::new(6, 4, 6, 6, 6),
    );
    if let Ok(k) = world.character_mut(kenny) {
        k.state = "determined".into();
    }

    let larry = add_human(
        &mut world,
        "Larry",
        "Ex-military, extremely strict and protective father of Lilly.",
        main_store,
        false,
        Personality::new(1, 4, 7, 2, 4),
        CombatStats::new(7, 4, 5, 4, 3),
    );
    if let Ok(l) = world.character_mut(larry) {
        l.health = 10;
        l.state = "aggressive".into();
    }

    // Friendships (gameSetup.py: same intent/levels, abbreviated cast).
    set_mutual_friendship(&mut world, player, clementine, 9);
    set_mutual_friendship(&mut world, player, kenny, 7);
    set_mutual_friendship(&mut world, player, larry, 2);
    set_mutual_friendship(&mut world, clementine, kenny, 6);
    set_mutual_friendship(&mut world, clementine, larry, 3);
    set_mutual_friendship(&mut world, kenny, larry, 3);

    let zombie1 = add_zombie(&mut world, "Angry Zombie", front_entrance);
    let zombie2 = add_zombie(&mut world, "Ugly Zombie", front_entrance);
    let zombie3 = add_zombie(&mut world, "Female Zombie", storage_room);
    for (a, b) in [
        (zombie1, zombie2),
        (zombie1, zombie3),
        (zombie2, zombie3),
    ] {
        set_mutual_friendship(&mut world, a, b, 5);
    }
    for zombie in [zombie1, zombie2, zombie3] {
        for human in [player, clementine, kenny, larry] {
            if let Ok(z) = world.character_mut(zombie) {
                z.friendships.set_hostile(human);
            }
            if let Ok(h) = world.character_mut(human) {
                h.friendships.set_hostile(zombie);
            }
        }
    }

    let mut first_aid_kit = Item::new("First Aid Kit", "A kit containing medical supplies.");
    first_aid_kit
        .abilities
        .push(Ability::new(names::MEDICATE, "Can be used to restore health to a character."));
    world.add_item_to_floor(first_aid_kit, pharmacy);

    let mut fire_axe = Item::new("Fire Axe", "A sharp axe useful for combat.")
        .with_damage(40)
        .with_robustness(80);
    fire_axe.abilities.push(Ability::new(
        names::BREACH_BARRICADE,
        "Can dismantle barricades/blocked doors when used appropriately.",
    ));
    world.add_item_to_floor(fire_axe, storage_room);

    let mut flashlight = Item::new("Flashlight", "Requires batteries to work.")
        .with_damage(3)
        .with_robustness(50);
    flashlight
        .abilities
        .push(Ability::new(names::ILLUMINATE, "Reveals or clarifies things in dark places."));
    world.add_item_to_inventory(flashlight, player);

    // Lee grew up here; seed his area knowledge.
    for area in [main_store, front_entrance, storage_room, pharmacy] {
        if let Ok(area) = world.area_mut(area) {
            area.known_by.insert(player);
        }
    }

    DrugstoreScenario {
        world,
        main_store,
        front_entrance,
        storage_room,
        pharmacy,
        far_away,
        door_to_pharmacy,
        player,
        clementine,
        kenny,
        larry,
        zombies: vec![zombie1, zombie2, zombie3],
    }
}

#[allow(clippy::too_many_arguments)]
fn add_human(
    world: &mut World,
    name: &str,
    description: &str,
    area: AreaId,
    controllable: bool,
    personality: Personality,
    stats: CombatStats,
) -> CharacterId {
    let mut character = Character::new(name, description, area);
    character.controllable = controllable;
    character.gender = Gender::Unspecified;
    character.personality = personality;
    character.stats = stats;
    world.add_character(character)
}

fn add_zombie(world: &mut World, name: &str, area: AreaId) -> CharacterId {
    let mut zombie = Character::new(name, "Undead monster out for blood.", area);
    zombie.controllable = false;
    zombie.personality = Personality::new(0, 0, 0, 0, 0);
    zombie.stats = CombatStats::new(6, 1, 2, 1, 10);
    zombie.state = "attack".into();
    zombie.hostile = true;
    zombie.abilities.push(Ability::new("Undead", "Immune to fear; relentless."));
    let id = world.add_character(zombie);

    let mut bite = Item::new("Bite", "A zombie's infectious bite.")
        .with_damage(10)
        .with_robustness(50);
    bite.abilities
        .push(Ability::new(names::INFECTIOUS_BITE, "Wounds risk infection; dangerous grapple."));
    let bite_id = world.add_item_to_inventory(bite, id);
    if let Ok(z) = world.character_mut(id) {
        z.equipment.equip(EquipmentSlot::RightHand, bite_id);
    }
    if let Ok(item) = world.item_mut(bite_id) {
        item.equipped = true;
    }
    id
}

fn set_mutual_friendship(world: &mut World, a: CharacterId, b: CharacterId, value: u8) {
    if let Ok(ca) = world.character_mut(a) {
        ca.friendships.set(b, value);
    }
    if let Ok(cb) = world.character_mut(b) {
        cb.friendships.set(a, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_has_consistent_residency_and_party_invariants() {
        let scenario = drugstore_in_macon();
        assert!(scenario.world.residency_is_consistent());
        assert!(scenario.world.party_is_symmetric());
    }

    #[test]
    fn larry_starts_critically_wounded() {
        let scenario = drugstore_in_macon();
        let larry = scenario.world.character(scenario.larry).unwrap();
        assert_eq!(larry.health, 10);
        assert!(larry.alive);
    }

    #[test]
    fn fire_axe_is_on_the_storage_room_floor() {
        let scenario = drugstore_in_macon();
        let storage = scenario.world.area(scenario.storage_room).unwrap();
        let axe_id = storage.key_items[0];
        let axe = scenario.world.item(axe_id).unwrap();
        assert_eq!(axe.name, "Fire Axe");
        assert_eq!(axe.placement, ItemPlacement::Floor(scenario.storage_room));
    }
}
