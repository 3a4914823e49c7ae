//! Persisted state layout (spec.md §6.2): a single JSON-like document with
//! top-level sections `world`, `characters`, `items`, `areas`, `links`.
//!
//! Collections are keyed by uid string in `BTreeMap`s so serialization is
//! deterministic and structural equality (needed for undo-stack dedup,
//! spec.md §4.8 step 11) falls out of `#[derive(PartialEq)]` without any
//! separate canonicalization pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use outbreak_domain::entities::item::ItemPlacement;
use outbreak_domain::value_objects::{CombatStats, Equipment, Friendship, Personality};
use outbreak_domain::{AreaId, CharacterId, ItemId, LinkingPointId, WorldId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSection {
    pub uid: WorldId,
    pub title: String,
    pub chaos_state: u8,
    pub current_dilemma: String,
    pub current_goal: String,
    pub grid_map: Option<Vec<Vec<Option<AreaId>>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSection {
    pub uid: CharacterId,
    pub name: String,
    pub description: String,
    pub current_area: AreaId,
    pub health: u8,
    pub alive: bool,
    pub controllable: bool,
    pub inventory: Vec<ItemId>,
    pub equipment: Equipment,
    pub party: Vec<CharacterId>,
    pub friendships: Friendship,
    pub topics: Vec<String>,
    pub state: String,
    pub personality: Personality,
    pub stats: CombatStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSection {
    pub uid: ItemId,
    pub name: String,
    pub description: String,
    pub damage: u32,
    pub robustness: u8,
    pub placement: ItemPlacement,
    pub equipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSection {
    pub uid: AreaId,
    pub name: String,
    pub description: String,
    pub exit: bool,
    pub key_items: Vec<ItemId>,
    pub characters: Vec<CharacterId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSection {
    pub uid: LinkingPointId,
    pub description: String,
    pub area_a: AreaId,
    pub area_b: AreaId,
    pub blocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub world: WorldSection,
    pub characters: BTreeMap<String, CharacterSection>,
    pub items: BTreeMap<String, ItemSection>,
    pub areas: BTreeMap<String, AreaSection>,
    pub links: BTreeMap<String, LinkSection>,
}

/// Metadata captured alongside a pushed snapshot (spec.md §6.2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub player_input: String,
    pub player_area: AreaId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: PersistedState,
    pub meta: SnapshotMeta,
}
