//! Per-round turn scheduling (spec.md §4.7): one planned step per actor,
//! speed-ordered execution with within-round engagement rules.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use outbreak_domain::{CharacterId, World};
use outbreak_shared::ActionEnvelope;

use crate::config::EngineConfig;
use crate::events::EventManager;
use crate::execute::{execute_action, QueuedStep, StepOrigin};
use crate::validate::validate_single;

#[derive(Debug, Default)]
pub struct TurnHandler {
    queue: HashMap<CharacterId, QueuedStep>,
    /// Who each actor has engaged this round, via a faster-earlier step
    /// (spec.md §4.7 "engagement"). Reset at the end of `run_one_round`.
    engaged_with: HashMap<CharacterId, HashSet<CharacterId>>,
}

impl TurnHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_step(&mut self, actor: CharacterId, action: ActionEnvelope, origin: StepOrigin) {
        self.queue.insert(
            actor,
            QueuedStep {
                actor,
                action,
                origin,
            },
        );
    }

    pub fn queue_controller_actions(&mut self, steps: Vec<(CharacterId, ActionEnvelope)>, origin: StepOrigin) {
        for (actor, action) in steps {
            self.queue_step(actor, action, origin);
        }
    }

    /// Runs until a full speed-ordered pass over the current queue makes no
    /// progress (spec.md §4.7). Cascades queued mid-round (group-move,
    /// group-join, fight spillover) are picked up by the re-scan as long as
    /// their actor hasn't already acted this round.
    pub fn run_one_round(
        &mut self,
        world: &mut World,
        events: &mut EventManager,
        config: &EngineConfig,
        rng: &mut impl Rng,
    ) -> Vec<String> {
        for character in world.characters.values_mut() {
            character.has_acted = false;
        }
        let mut narrations = Vec::new();
        loop {
            let order = self.sorted_pending_actors(world);
            if order.is_empty() {
                break;
            }
            let mut progressed = false;
            for actor in order {
                let Some(step) = self.queue.remove(&actor) else {
                    continue;
                };
                progressed = true;
                narrations.push(self.run_step(step, world, events, config, rng));
            }
            if !progressed {
                break;
            }
        }
        self.queue.clear();
        self.engaged_with.clear();
        narrations
    }

    fn sorted_pending_actors(&self, world: &World) -> Vec<CharacterId> {
        let mut actors: Vec<CharacterId> = self.queue.keys().copied().collect();
        actors.sort_by(|a, b| {
            let speed_a = world.characters.get(a).map(|c| c.stats.speed).unwrap_or(0);
            let speed_b = world.characters.get(b).map(|c| c.stats.speed).unwrap_or(0);
            let name_a = world.characters.get(a).map(|c| c.name.as_str()).unwrap_or("");
            let name_b = world.characters.get(b).map(|c| c.name.as_str()).unwrap_or("");
            speed_b.cmp(&speed_a).then_with(|| name_a.cmp(name_b))
        });
        actors
    }

    fn step_partners(action: &ActionEnvelope) -> Vec<CharacterId> {
        [action.target, action.indirect_target].into_iter().flatten().collect()
    }

    fn in_party(world: &World, a: CharacterId, b: CharacterId) -> bool {
        world.characters.get(&a).map(|c| c.party.contains(&b)).unwrap_or(false)
    }

    fn mark_acted(world: &mut World, actor: CharacterId) {
        if let Ok(actor_ref) = world.character_mut(actor) {
            actor_ref.has_acted = true;
        }
    }

    fn name_of(world: &World, actor: CharacterId) -> String {
        world.characters.get(&actor).map(|c| c.name.clone()).unwrap_or_default()
    }

    fn run_step(
        &mut self,
        step: QueuedStep,
        world: &mut World,
        events: &mut EventManager,
        config: &EngineConfig,
        rng: &mut impl Rng,
    ) -> String {
        let QueuedStep { actor, action, origin } = step;
        let partners = Self::step_partners(&action);

        if let Some(required) = self.engaged_with.get(&actor) {
            if !required.is_empty() && !partners.iter().any(|p| required.contains(p)) {
                Self::mark_acted(world, actor);
                return format!("{} is interrupted before acting.", Self::name_of(world, actor));
            }
        }
        for &partner in &partners {
            let blocked = self
                .engaged_with
                .get(&partner)
                .is_some_and(|theirs| theirs.iter().any(|&other| other != actor && !Self::in_party(world, actor, other)));
            if blocked {
                Self::mark_acted(world, actor);
                return format!(
                    "{} can't reach {} right now.",
                    Self::name_of(world, actor),
                    Self::name_of(world, partner)
                );
            }
        }

        if let Some(reason) = validate_single(&action, world, events) {
            Self::mark_acted(world, actor);
            return reason;
        }

        let outcome = execute_action(&action, origin, world, events, config, rng);
        for &partner in &partners {
            self.engaged_with.entry(actor).or_default().insert(partner);
            self.engaged_with.entry(partner).or_default().insert(actor);
        }
        events.check_for_event_triggers_after_action(actor, world);
        Self::mark_acted(world, actor);

        for cascade in outcome.cascades {
            let already_acted = world.characters.get(&cascade.actor).map(|c| c.has_acted).unwrap_or(true);
            if !already_acted {
                self.queue_step(cascade.actor, cascade.action, cascade.origin);
            }
        }

        outcome.narration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character};
    use outbreak_shared::ActionKind;

    #[test]
    fn faster_actor_runs_before_slower_one() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let mut fast = Character::new("Fast", "desc", area);
        fast.stats.speed = 9;
        let fast = world.add_character(fast);
        let mut slow = Character::new("Slow", "desc", area);
        slow.stats.speed = 1;
        let slow = world.add_character(slow);

        let mut handler = TurnHandler::new();
        handler.queue_step(slow, ActionEnvelope::new(slow, ActionKind::DoNothing), StepOrigin::Player);
        handler.queue_step(fast, ActionEnvelope::new(fast, ActionKind::DoNothing), StepOrigin::Player);

        let mut events = EventManager::new();
        let config = EngineConfig::default();
        let mut rng = rand::thread_rng();
        let narrations = handler.run_one_round(&mut world, &mut events, &config, &mut rng);
        assert_eq!(narrations.len(), 2);
        assert!(narrations[0].starts_with("Fast"));
    }

    #[test]
    fn cascaded_step_runs_within_the_same_round() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Front Entrance", "desc", false));
        let next = world.add_area(Area::new("Main Store", "desc", false));
        world.link_areas("doorway", area, next);
        let mut leader = Character::new("Lee", "desc", area);
        leader.controllable = true;
        let leader = world.add_character(leader);
        let follower = world.add_character(Character::new("Clementine", "desc", area));
        if let Ok(l) = world.character_mut(leader) {
            l.party.push(follower);
        }
        if let Ok(f) = world.character_mut(follower) {
            f.party.push(leader);
        }

        let mut handler = TurnHandler::new();
        let mut move_action = ActionEnvelope::new(leader, ActionKind::Move);
        move_action.location = Some(next);
        handler.queue_step(leader, move_action, StepOrigin::Player);

        let mut events = EventManager::new();
        let config = EngineConfig::default();
        let mut rng = rand::thread_rng();
        handler.run_one_round(&mut world, &mut events, &config, &mut rng);

        assert_eq!(world.character(follower).unwrap().current_area, next);
    }
}
