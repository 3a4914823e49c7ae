//! Area (a.k.a. SubArea) and LinkingPoint entities (spec.md §3).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{AreaId, CharacterId, EventId, ItemId, LinkingPointId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkingPoint {
    pub uid: LinkingPointId,
    pub description: String,
    pub area_a: AreaId,
    pub area_b: AreaId,
    pub blocked: bool,
}

impl LinkingPoint {
    pub fn new(description: impl Into<String>, area_a: AreaId, area_b: AreaId) -> Self {
        Self {
            uid: LinkingPointId::new(),
            description: description.into(),
            area_a,
            area_b,
            blocked: false,
        }
    }

    pub fn other_area(&self, current: AreaId) -> AreaId {
        if current == self.area_a {
            self.area_b
        } else {
            self.area_a
        }
    }

    pub fn connects(&self, a: AreaId, b: AreaId) -> bool {
        (self.area_a == a && self.area_b == b) || (self.area_a == b && self.area_b == a)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub uid: AreaId,
    pub name: String,
    pub description: String,
    /// A `far_away`-style exit area is reachable but leaving the playable
    /// map; spec.md §6.3 win condition checks for this.
    pub exit: bool,
    pub linking_points: Vec<LinkingPointId>,
    pub key_items: Vec<ItemId>,
    pub characters: Vec<CharacterId>,
    pub active_events: Vec<EventId>,
    pub known_by: HashSet<CharacterId>,
}

impl Area {
    pub fn new(name: impl Into<String>, description: impl Into<String>, exit: bool) -> Self {
        Self {
            uid: AreaId::new(),
            name: name.into(),
            description: description.into(),
            exit,
            linking_points: Vec::new(),
            key_items: Vec::new(),
            characters: Vec::new(),
            active_events: Vec::new(),
            known_by: HashSet::new(),
        }
    }

    pub fn with_uid(mut self, uid: AreaId) -> Self {
        self.uid = uid;
        self
    }

    pub fn add_linking_point(&mut self, link: LinkingPointId) {
        self.linking_points.push(link);
    }

    pub fn add_resident(&mut self, character: CharacterId) {
        if !self.characters.contains(&character) {
            self.characters.push(character);
        }
    }

    pub fn remove_resident(&mut self, character: CharacterId) {
        self.characters.retain(|c| *c != character);
    }

    pub fn remove_key_item(&mut self, item: ItemId) {
        self.key_items.retain(|i| *i != item);
    }
}
