//! Item entity (spec.md §3).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::ability::Ability;
use crate::{AreaId, CharacterId, ItemId};

/// Exactly one of these holds at a time (spec.md §3 invariant), or the item
/// is unreferenced (the unarmed "Hands" pseudo-weapon, SPEC_FULL.md §C.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemPlacement {
    Floor(AreaId),
    Held(CharacterId),
    Unplaced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub uid: ItemId,
    pub name: String,
    pub description: String,
    pub damage: u32,
    pub robustness: u8,
    pub placement: ItemPlacement,
    pub equipped: bool,
    pub abilities: Vec<Ability>,
    pub known_by: HashSet<CharacterId>,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            uid: ItemId::new(),
            name: name.into(),
            description: description.into(),
            damage: 0,
            robustness: 0,
            placement: ItemPlacement::Unplaced,
            equipped: false,
            abilities: Vec::new(),
            known_by: HashSet::new(),
        }
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_robustness(mut self, robustness: u8) -> Self {
        self.robustness = robustness;
        self
    }

    pub fn with_uid(mut self, uid: ItemId) -> Self {
        self.uid = uid;
        self
    }

    pub fn has_ability(&self, name: &str) -> bool {
        self.abilities.iter().any(|a| a.name == name)
    }

    pub fn holder(&self) -> Option<CharacterId> {
        match self.placement {
            ItemPlacement::Held(c) => Some(c),
            _ => None,
        }
    }

    pub fn floor_area(&self) -> Option<AreaId> {
        match self.placement {
            ItemPlacement::Floor(a) => Some(a),
            _ => None,
        }
    }

    /// A fragile tool breaks on use once its robustness drops to 20 or
    /// below (spec.md §3 lifecycle rule).
    pub fn is_fragile(&self) -> bool {
        self.robustness <= 20
    }

    pub fn invariant_holds(&self) -> bool {
        if self.equipped {
            return matches!(self.placement, ItemPlacement::Held(_));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipped_implies_held() {
        let mut item = Item::new("Fire Axe", "A sharp axe.").with_damage(40);
        item.placement = ItemPlacement::Held(CharacterId::new());
        item.equipped = true;
        assert!(item.invariant_holds());

        item.placement = ItemPlacement::Unplaced;
        assert!(!item.invariant_holds());
    }
}
