//! Engine configuration (SPEC_FULL.md §B), grounded on the teacher's
//! `infrastructure::config::AppConfig::from_env` pattern: defaults baked in
//! so tests never need an environment, with `EngineConfig::from_env`
//! layering `OUTBREAK_*` overrides via the `config` crate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Default unarmed weapon damage (spec.md §4.4).
    pub default_weapon_damage: u32,
    /// `use_item` heal amount for the `Medicate` ability (spec.md §4.4).
    pub heal_amount: u8,
    /// Robustness at/below which a tool breaks on use (spec.md §3).
    pub fragile_robustness_threshold: u8,
    /// Friendship threshold for `give_item` warm acceptance and
    /// `join_party` (spec.md §4.4).
    pub generous_friendship_threshold: u8,
    /// Health below which a reluctant `give_item` acceptance still happens
    /// despite low friendship (spec.md §4.4).
    pub desperate_health_threshold: u8,
    /// Health floor both parties must clear for `join_party` (spec.md §4.4).
    pub party_join_health_floor: u8,
    /// Storytelling/output-validator retry cap (spec.md §6.1, §7.6).
    pub narration_retry_limit: u8,
    /// Emit one concrete next-step suggestion every N completed turns
    /// (spec.md §4.8 step 12).
    pub suggestion_cadence: u8,
    /// Win threshold for the designated NPC's health (spec.md §4.8 step 13).
    pub npc_win_health_threshold: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_weapon_damage: 5,
            heal_amount: 30,
            fragile_robustness_threshold: 20,
            generous_friendship_threshold: 3,
            desperate_health_threshold: 40,
            party_join_health_floor: 30,
            narration_retry_limit: 3,
            suggestion_cadence: 2,
            npc_win_health_threshold: 90,
        }
    }
}

impl EngineConfig {
    /// Layers `OUTBREAK_*` environment overrides on top of the defaults.
    /// Never fails on a missing environment: an absent `.env`/variable set
    /// just yields the defaults above.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let built = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::Environment::with_prefix("OUTBREAK"))
            .build()?;
        built.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_an_environment() {
        let config = EngineConfig::default();
        assert_eq!(config.default_weapon_damage, 5);
        assert_eq!(config.narration_retry_limit, 3);
    }
}
