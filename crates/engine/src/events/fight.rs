//! FightEvent (spec.md §4.5): multi-participant, non-blocking; resolves
//! when fewer than two alive participants remain or participants split
//! across areas.

use outbreak_domain::{AreaId, CharacterId, EventId, World};

use super::Event;

#[derive(Debug, Clone)]
pub struct FightEvent {
    id: EventId,
    location: AreaId,
    participants: Vec<CharacterId>,
    active: bool,
}

impl FightEvent {
    pub fn new(location: AreaId, participants: Vec<CharacterId>) -> Self {
        Self {
            id: EventId::new(),
            location,
            participants,
            active: true,
        }
    }

    pub fn involves(&self, character: CharacterId) -> bool {
        self.participants.contains(&character)
    }
}

impl Event for FightEvent {
    fn id(&self) -> EventId {
        self.id
    }

    fn name(&self) -> &str {
        "Fight"
    }

    fn location(&self) -> AreaId {
        self.location
    }

    fn participants(&self) -> &[CharacterId] {
        &self.participants
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn resolve_if_needed(&mut self, world: &World) {
        if !self.active {
            return;
        }
        let alive_here: Vec<CharacterId> = self
            .participants
            .iter()
            .copied()
            .filter(|p| {
                world
                    .characters
                    .get(p)
                    .map(|c| c.alive && c.current_area == self.location)
                    .unwrap_or(false)
            })
            .collect();
        if alive_here.len() < 2 {
            self.resolve();
        }
    }

    fn resolve(&mut self) {
        self.active = false;
    }

    fn add_participant(&mut self, who: CharacterId) {
        if !self.participants.contains(&who) {
            self.participants.push(who);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character};

    #[test]
    fn resolves_when_participants_drop_below_two() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let attacker = world.add_character(Character::new("Lee", "desc", area));
        let victim = world.add_character(Character::new("Zombie", "desc", area).with_health(0));

        let mut fight = FightEvent::new(area, vec![attacker, victim]);
        fight.resolve_if_needed(&world);
        assert!(!fight.is_active());
    }

    #[test]
    fn stays_active_with_two_alive_co_located_participants() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let attacker = world.add_character(Character::new("Lee", "desc", area));
        let victim = world.add_character(Character::new("Zombie", "desc", area));

        let mut fight = FightEvent::new(area, vec![attacker, victim]);
        fight.resolve_if_needed(&world);
        assert!(fight.is_active());
    }
}
