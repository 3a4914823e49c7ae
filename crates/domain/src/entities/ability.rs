//! Generic attachable ability (grounded on `gameRenderer.py Ability`,
//! SPEC_FULL.md §C.3). Abilities are plain data; the executor dispatches on
//! `name` (e.g. "Medicate" heals, "BreachBarricade" resolves a blockade)
//! rather than on a closed Rust enum, mirroring the prototype's data-driven
//! shape and leaving room for scenario authors to add abilities without
//! touching the engine.

use serde::{Deserialize, Serialize};

use crate::AbilityId;

/// Well-known ability names the executor and event system dispatch on.
pub mod names {
    pub const MEDICATE: &str = "Medicate";
    pub const BREACH_BARRICADE: &str = "BreachBarricade";
    pub const ILLUMINATE: &str = "Illuminate";
    pub const RANGED: &str = "Ranged";
    pub const FIXER: &str = "Fixer";
    pub const INFECTIOUS_BITE: &str = "InfectiousBite";
    pub const PLOT_ARMOR: &str = "PlotArmor";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub uid: AbilityId,
    pub name: String,
    pub description: String,
}

impl Ability {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            uid: AbilityId::new(),
            name: name.into(),
            description: description.into(),
        }
    }
}
