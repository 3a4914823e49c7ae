//! Combat/skill stats, each clamped to `0..=10` (spec.md §3).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub strength: u8,
    pub intelligence: u8,
    pub skill: u8,
    pub speed: u8,
    pub endurance: u8,
}

impl CombatStats {
    pub fn new(strength: u8, intelligence: u8, skill: u8, speed: u8, endurance: u8) -> Self {
        Self {
            strength: strength.min(10),
            intelligence: intelligence.min(10),
            skill: skill.min(10),
            speed: speed.min(10),
            endurance: endurance.min(10),
        }
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self::new(5, 5, 5, 5, 5)
    }
}
