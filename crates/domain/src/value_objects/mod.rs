pub mod equipment;
pub mod friendship;
pub mod personality;
pub mod stats;

pub use equipment::{Equipment, EquipmentSlot};
pub use friendship::Friendship;
pub use personality::Personality;
pub use stats::CombatStats;
