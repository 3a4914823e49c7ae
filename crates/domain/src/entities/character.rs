//! Character entity (spec.md §3).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::ability::Ability;
use crate::knowledge::KnowledgeBase;
use crate::value_objects::{CombatStats, Equipment, EquipmentSlot, Friendship, Personality};
use crate::{AreaId, CharacterId, ItemId};

/// Carried over from the prototype's `gender: int = 0..2` field
/// (SPEC_FULL.md §C.4); not otherwise used by engine logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Unspecified,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub uid: CharacterId,
    pub name: String,
    pub description: String,
    pub current_area: AreaId,
    pub health: u8,
    pub alive: bool,
    pub controllable: bool,
    pub gender: Gender,
    pub inventory: Vec<ItemId>,
    pub equipment: Equipment,
    pub party: Vec<CharacterId>,
    pub friendships: Friendship,
    pub topics: Vec<String>,
    pub state: String,
    pub personality: Personality,
    pub stats: CombatStats,
    pub abilities: Vec<Ability>,
    pub known_items: HashSet<ItemId>,
    pub known_areas: HashSet<AreaId>,
    pub known_people: HashSet<CharacterId>,
    pub knowledge: KnowledgeBase,
    /// A hostile NPC regardless of friendship, per spec.md §4.5 hostile
    /// trigger rule (`hostile=true`). Zombies set this at world init.
    pub hostile: bool,
    /// Set at the executing→post_events boundary (spec.md §4.4.1); prevents
    /// re-selection for the remainder of the round.
    pub has_acted: bool,
}

impl Character {
    pub fn new(name: impl Into<String>, description: impl Into<String>, area: AreaId) -> Self {
        Self {
            uid: CharacterId::new(),
            name: name.into(),
            description: description.into(),
            current_area: area,
            health: 100,
            alive: true,
            controllable: false,
            gender: Gender::Unspecified,
            inventory: Vec::new(),
            equipment: Equipment::new(),
            party: Vec::new(),
            friendships: Friendship::new(),
            topics: Vec::new(),
            state: String::from("idle"),
            personality: Personality::default(),
            stats: CombatStats::default(),
            abilities: Vec::new(),
            known_items: HashSet::new(),
            known_areas: HashSet::new(),
            known_people: HashSet::new(),
            knowledge: KnowledgeBase::new(),
            hostile: false,
            has_acted: false,
        }
    }

    pub fn with_uid(mut self, uid: CharacterId) -> Self {
        self.uid = uid;
        self
    }

    pub fn with_health(mut self, health: u8) -> Self {
        self.health = health;
        self.alive = health > 0;
        self
    }

    /// Considered a hostile trigger for `EventManager::check_for_event_triggers_after_action`
    /// (spec.md §4.5): friendship ≤1 in either direction, `hostile=true`, or
    /// a hostile state tag.
    pub fn is_hostile_toward(&self, other: &Character) -> bool {
        const HOSTILE_STATES: [&str; 3] = ["attack", "hostile", "enemy"];
        self.hostile
            || HOSTILE_STATES.contains(&self.state.as_str())
            || self.friendships.get(other.uid) <= 1
            || other.friendships.get(self.uid) <= 1
    }

    pub fn add_item(&mut self, item: ItemId) {
        if !self.inventory.contains(&item) {
            self.inventory.push(item);
        }
    }

    pub fn remove_item(&mut self, item: ItemId) {
        self.inventory.retain(|i| *i != item);
        self.equipment.unequip_item(item);
    }

    pub fn is_in_party_with(&self, other: CharacterId) -> bool {
        self.party.contains(&other)
    }

    pub fn join_party(&mut self, other: CharacterId) {
        if !self.party.contains(&other) {
            self.party.push(other);
        }
    }

    pub fn leave_party(&mut self, other: CharacterId) {
        self.party.retain(|p| *p != other);
    }

    pub fn free_slot_for(&self, is_weapon: bool) -> Option<EquipmentSlot> {
        EquipmentSlot::preferred_for(is_weapon)
            .into_iter()
            .find(|slot| self.equipment.get(*slot).is_none())
    }

    pub fn apply_damage(&mut self, amount: u32) {
        let amount = amount.min(self.health as u32);
        self.health -= amount as u8;
        if self.health == 0 {
            self.alive = false;
            self.party.clear();
        }
    }

    pub fn heal(&mut self, amount: u8) {
        self.health = self.health.saturating_add(amount).min(100);
    }

    /// Bare-handed fallback weapon (SPEC_FULL.md §C.2, grounded on
    /// `gameSetup.get_default_weapon`): never placed in inventory or on the
    /// floor, used only when no hand slot is equipped.
    pub fn unarmed_weapon() -> crate::entities::Item {
        crate::entities::Item::new("Hands", "Bare hands - default weapon.")
            .with_damage(5)
            .with_robustness(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_clears_party_links_and_flips_alive() {
        let mut c = Character::new("Larry", "desc", AreaId::new());
        c.health = 10;
        c.party.push(CharacterId::new());
        c.apply_damage(10);
        assert_eq!(c.health, 0);
        assert!(!c.alive);
        assert!(c.party.is_empty());
    }

    #[test]
    fn heal_clamps_to_one_hundred() {
        let mut c = Character::new("Lee", "desc", AreaId::new());
        c.health = 95;
        c.heal(30);
        assert_eq!(c.health, 100);
    }
}
