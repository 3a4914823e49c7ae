//! World aggregate: the uid-keyed arena owning every Area, Character, Item,
//! and LinkingPoint (spec.md §3, §9 "arena + stable uid" redesign note).

pub mod seed;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::{Area, Character, Item, LinkingPoint};
use crate::error::DomainError;
use crate::{AreaId, CharacterId, ItemId, LinkingPointId, WorldId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub uid: WorldId,
    pub title: String,
    pub chaos_state: u8,
    pub current_dilemma: String,
    pub current_goal: String,
    pub areas: HashMap<AreaId, Area>,
    pub characters: HashMap<CharacterId, Character>,
    pub items: HashMap<ItemId, Item>,
    pub linking_points: HashMap<LinkingPointId, LinkingPoint>,
    /// Rows of area uids, `None` for an unmapped cell (spec.md §3's
    /// "rows of uids or 0").
    pub grid_map: Option<Vec<Vec<Option<AreaId>>>>,
}

impl World {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            uid: WorldId::new(),
            title: title.into(),
            chaos_state: 0,
            current_dilemma: String::new(),
            current_goal: String::new(),
            areas: HashMap::new(),
            characters: HashMap::new(),
            items: HashMap::new(),
            linking_points: HashMap::new(),
            grid_map: None,
        }
    }

    pub fn set_chaos_state(&mut self, value: u8) {
        self.chaos_state = value.min(10);
    }

    pub fn add_area(&mut self, area: Area) -> AreaId {
        let id = area.uid;
        self.areas.insert(id, area);
        id
    }

    pub fn add_character(&mut self, character: Character) -> CharacterId {
        let id = character.uid;
        let area = character.current_area;
        self.characters.insert(id, character);
        if let Some(area) = self.areas.get_mut(&area) {
            area.add_resident(id);
        }
        id
    }

    pub fn add_item_to_floor(&mut self, mut item: Item, area: AreaId) -> ItemId {
        item.placement = crate::entities::item::ItemPlacement::Floor(area);
        let id = item.uid;
        self.items.insert(id, item);
        if let Some(area) = self.areas.get_mut(&area) {
            area.key_items.push(id);
        }
        id
    }

    pub fn add_item_to_inventory(&mut self, mut item: Item, holder: CharacterId) -> ItemId {
        item.placement = crate::entities::item::ItemPlacement::Held(holder);
        let id = item.uid;
        self.items.insert(id, item);
        if let Some(character) = self.characters.get_mut(&holder) {
            character.add_item(id);
        }
        id
    }

    /// Links two areas bidirectionally (spec.md §3 LinkingPoint invariant:
    /// "referenced by both endpoints").
    pub fn link_areas(
        &mut self,
        description: impl Into<String>,
        area_a: AreaId,
        area_b: AreaId,
    ) -> LinkingPointId {
        let link = LinkingPoint::new(description, area_a, area_b);
        let id = link.uid;
        self.linking_points.insert(id, link);
        if let Some(area) = self.areas.get_mut(&area_a) {
            area.add_linking_point(id);
        }
        if let Some(area) = self.areas.get_mut(&area_b) {
            area.add_linking_point(id);
        }
        id
    }

    /// Pure topological adjacency — does not account for blockades; callers
    /// needing gated movement (spec.md §4.3 move validation) combine this
    /// with `EventManager::validate_movement`.
    pub fn neighbors(&self, area: AreaId) -> Vec<(AreaId, LinkingPointId)> {
        let Some(area_ref) = self.areas.get(&area) else {
            return Vec::new();
        };
        area_ref
            .linking_points
            .iter()
            .filter_map(|link_id| {
                self.linking_points
                    .get(link_id)
                    .map(|link| (link.other_area(area), *link_id))
            })
            .collect()
    }

    pub fn area(&self, id: AreaId) -> Result<&Area, DomainError> {
        self.areas
            .get(&id)
            .ok_or_else(|| DomainError::not_found("Area", id.to_string()))
    }

    pub fn area_mut(&mut self, id: AreaId) -> Result<&mut Area, DomainError> {
        self.areas
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Area", id.to_string()))
    }

    pub fn character(&self, id: CharacterId) -> Result<&Character, DomainError> {
        self.characters
            .get(&id)
            .ok_or_else(|| DomainError::not_found("Character", id.to_string()))
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Result<&mut Character, DomainError> {
        self.characters
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Character", id.to_string()))
    }

    pub fn item(&self, id: ItemId) -> Result<&Item, DomainError> {
        self.items
            .get(&id)
            .ok_or_else(|| DomainError::not_found("Item", id.to_string()))
    }

    pub fn item_mut(&mut self, id: ItemId) -> Result<&mut Item, DomainError> {
        self.items
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Item", id.to_string()))
    }

    pub fn linking_point(&self, id: LinkingPointId) -> Result<&LinkingPoint, DomainError> {
        self.linking_points
            .get(&id)
            .ok_or_else(|| DomainError::not_found("LinkingPoint", id.to_string()))
    }

    pub fn linking_point_mut(&mut self, id: LinkingPointId) -> Result<&mut LinkingPoint, DomainError> {
        self.linking_points
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("LinkingPoint", id.to_string()))
    }

    /// Invariant check used by tests (spec.md §8): every resident's
    /// `current_area` must point back to the area listing them.
    pub fn residency_is_consistent(&self) -> bool {
        self.areas.values().all(|area| {
            area.characters.iter().all(|c| {
                self.characters
                    .get(c)
                    .map(|character| character.current_area == area.uid)
                    .unwrap_or(false)
            })
        })
    }

    /// Invariant check (spec.md §8): party relation is symmetric, no self-membership.
    pub fn party_is_symmetric(&self) -> bool {
        self.characters.values().all(|character| {
            character.party.iter().all(|&other| {
                other != character.uid
                    && self
                        .characters
                        .get(&other)
                        .map(|o| o.party.contains(&character.uid))
                        .unwrap_or(false)
            })
        })
    }
}
