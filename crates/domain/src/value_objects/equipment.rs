//! Equipment slots (spec.md §3: `equipment (mapping slot→Item over
//! {head, torso, legs, left_hand, right_hand, extra})`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Head,
    Torso,
    Legs,
    LeftHand,
    RightHand,
    Extra,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 6] = [
        EquipmentSlot::Head,
        EquipmentSlot::Torso,
        EquipmentSlot::Legs,
        EquipmentSlot::LeftHand,
        EquipmentSlot::RightHand,
        EquipmentSlot::Extra,
    ];

    /// Weapons prefer hand slots; non-damage items prefer `extra` (spec.md §4.4).
    pub fn preferred_for(is_weapon: bool) -> [EquipmentSlot; 3] {
        if is_weapon {
            [
                EquipmentSlot::RightHand,
                EquipmentSlot::LeftHand,
                EquipmentSlot::Extra,
            ]
        } else {
            [
                EquipmentSlot::Extra,
                EquipmentSlot::Torso,
                EquipmentSlot::Legs,
            ]
        }
    }

    pub fn is_hand(&self) -> bool {
        matches!(self, EquipmentSlot::LeftHand | EquipmentSlot::RightHand)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment(HashMap<EquipmentSlot, ItemId>);

impl Equipment {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<ItemId> {
        self.0.get(&slot).copied()
    }

    pub fn slot_of(&self, item: ItemId) -> Option<EquipmentSlot> {
        self.0
            .iter()
            .find(|(_, i)| **i == item)
            .map(|(slot, _)| *slot)
    }

    /// Equips `item` into `slot`, returning whichever item previously
    /// occupied that slot (it becomes unequipped).
    pub fn equip(&mut self, slot: EquipmentSlot, item: ItemId) -> Option<ItemId> {
        self.0.insert(slot, item)
    }

    pub fn unequip_slot(&mut self, slot: EquipmentSlot) -> Option<ItemId> {
        self.0.remove(&slot)
    }

    pub fn unequip_item(&mut self, item: ItemId) -> Option<EquipmentSlot> {
        let slot = self.slot_of(item)?;
        self.0.remove(&slot);
        Some(slot)
    }

    pub fn is_equipped(&self, item: ItemId) -> bool {
        self.0.values().any(|i| *i == item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, ItemId)> + '_ {
        self.0.iter().map(|(s, i)| (*s, *i))
    }

    pub fn hand_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.0
            .iter()
            .filter(|(s, _)| s.is_hand())
            .map(|(_, i)| *i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipping_into_occupied_slot_returns_previous_occupant() {
        let mut eq = Equipment::new();
        let first = ItemId::new();
        let second = ItemId::new();
        assert_eq!(eq.equip(EquipmentSlot::RightHand, first), None);
        assert_eq!(eq.equip(EquipmentSlot::RightHand, second), Some(first));
        assert!(eq.is_equipped(second));
        assert!(!eq.is_equipped(first));
    }
}
