//! End-of-game evaluation (spec.md §4.8 step 13, §6.3).

use outbreak_domain::{CharacterId, World};

use crate::config::EngineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Win,
    Loss,
}

/// health=0 -> loss; player in the `far_away` exit area, or the designated
/// NPC healed to the win threshold, -> win; otherwise ongoing.
pub fn evaluate(world: &World, config: &EngineConfig, player: CharacterId, win_npc: Option<CharacterId>) -> Outcome {
    let Some(player_ref) = world.characters.get(&player) else {
        return Outcome::Ongoing;
    };
    if !player_ref.alive || player_ref.health == 0 {
        return Outcome::Loss;
    }
    if world.areas.get(&player_ref.current_area).map(|a| a.exit).unwrap_or(false) {
        return Outcome::Win;
    }
    if let Some(npc) = win_npc {
        if world
            .characters
            .get(&npc)
            .map(|c| c.health >= config.npc_win_health_threshold)
            .unwrap_or(false)
        {
            return Outcome::Win;
        }
    }
    Outcome::Ongoing
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character};

    #[test]
    fn zero_health_is_a_loss_even_in_the_exit_area() {
        let mut world = World::new("Test");
        let exit = world.add_area(Area::new("Far Away", "desc", true));
        let player = world.add_character(Character::new("Lee", "desc", exit).with_health(0));
        let config = EngineConfig::default();
        assert_eq!(evaluate(&world, &config, player, None), Outcome::Loss);
    }

    #[test]
    fn reaching_the_exit_area_alive_is_a_win() {
        let mut world = World::new("Test");
        let exit = world.add_area(Area::new("Far Away", "desc", true));
        let player = world.add_character(Character::new("Lee", "desc", exit));
        let config = EngineConfig::default();
        assert_eq!(evaluate(&world, &config, player, None), Outcome::Win);
    }

    #[test]
    fn healing_the_designated_npc_past_threshold_is_a_win() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let player = world.add_character(Character::new("Lee", "desc", area));
        let npc = world.add_character(Character::new("Kenny", "desc", area).with_health(95));
        let config = EngineConfig::default();
        assert_eq!(evaluate(&world, &config, player, Some(npc)), Outcome::Win);
    }
}
