//! Structurally-typed last-observed state (spec.md §4.6).

use serde::{Deserialize, Serialize};

use crate::value_objects::{CombatStats, EquipmentSlot, Personality};
use crate::{AreaId, CharacterId, ItemId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub uid: ItemId,
    pub name: String,
    pub holder: Option<CharacterId>,
    pub position: Option<AreaId>,
    pub equipped: bool,
    pub equipped_slot: Option<EquipmentSlot>,
    pub damage: u32,
    pub robustness: u8,
    pub description: String,
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntrySnapshot {
    pub uid: ItemId,
    pub name: String,
    pub equipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub uid: CharacterId,
    pub name: String,
    pub health: u8,
    pub alive: bool,
    pub current_area: AreaId,
    pub equipped_slots: Vec<(EquipmentSlot, ItemId)>,
    pub stats: CombatStats,
    pub personality: Personality,
    pub inventory: Vec<InventoryEntrySnapshot>,
    pub party: Vec<CharacterId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRefSnapshot {
    pub uid: CharacterId,
    pub name: String,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRefSnapshot {
    pub uid: ItemId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSnapshot {
    pub uid: AreaId,
    pub name: String,
    pub description: String,
    pub characters: Vec<CharacterRefSnapshot>,
    pub floor_items: Vec<ItemRefSnapshot>,
    pub linked_areas: Vec<(AreaId, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity_type")]
pub enum EntitySnapshot {
    Item(ItemSnapshot),
    Character(CharacterSnapshot),
    Area(AreaSnapshot),
}
