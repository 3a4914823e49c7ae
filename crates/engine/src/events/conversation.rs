//! ConversationEvent (spec.md §4.5): turn-gated dialogue cycling through
//! `need_topic -> waiting_for_player_response -> npc_responses`.

use std::collections::HashSet;

use outbreak_domain::{AreaId, CharacterId, EventId, World};

use super::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    NeedTopic,
    WaitingForPlayerResponse,
    NpcResponses,
}

#[derive(Debug, Clone)]
pub struct ConversationEvent {
    id: EventId,
    location: AreaId,
    participants: Vec<CharacterId>,
    phase: ConversationPhase,
    topic: Option<String>,
    responded_this_round: HashSet<CharacterId>,
    active: bool,
}

impl ConversationEvent {
    pub fn new(location: AreaId, participants: Vec<CharacterId>) -> Self {
        Self {
            id: EventId::new(),
            location,
            participants,
            phase: ConversationPhase::NeedTopic,
            topic: None,
            responded_this_round: HashSet::new(),
            active: true,
        }
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Only a controllable character may introduce a topic (spec.md §4.5).
    /// Returns `false` (no-op) if called by an NPC or out of phase.
    pub fn introduce_topic(&mut self, actor: CharacterId, topic: impl Into<String>, world: &World) -> bool {
        if self.phase != ConversationPhase::NeedTopic {
            return false;
        }
        let Some(character) = world.characters.get(&actor) else {
            return false;
        };
        if !character.controllable {
            return false;
        }
        self.topic = Some(topic.into());
        self.phase = ConversationPhase::WaitingForPlayerResponse;
        true
    }

    /// Advances to the NPC-response phase once the player has spoken.
    pub fn begin_npc_responses(&mut self) {
        if self.phase == ConversationPhase::WaitingForPlayerResponse {
            self.phase = ConversationPhase::NpcResponses;
        }
    }

    /// Each NPC may respond at most once per round (spec.md §4.5
    /// `responded_this_round`).
    pub fn npc_can_respond(&self, npc: CharacterId) -> bool {
        self.phase == ConversationPhase::NpcResponses && !self.responded_this_round.contains(&npc)
    }

    pub fn mark_responded(&mut self, npc: CharacterId) {
        self.responded_this_round.insert(npc);
    }

    /// Clears the per-round responder set; called by the turn handler at
    /// round boundaries.
    pub fn reset_round(&mut self) {
        self.responded_this_round.clear();
        if self.phase == ConversationPhase::NpcResponses {
            self.phase = ConversationPhase::NeedTopic;
        }
    }
}

impl Event for ConversationEvent {
    fn id(&self) -> EventId {
        self.id
    }

    fn name(&self) -> &str {
        "Conversation"
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
        let still_co_located = self
            .participants
            .iter()
            .filter(|p| {
                world
                    .characters
                    .get(p)
                    .map(|c| c.alive && c.current_area == self.location)
                    .unwrap_or(false)
            })
            .count();
        if still_co_located < 2 {
            self.resolve();
        }
    }

    fn resolve(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character};

    #[test]
    fn npcs_cannot_introduce_topics() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let npc = world.add_character(Character::new("Kenny", "desc", area));
        let mut event = ConversationEvent::new(area, vec![npc]);
        assert!(!event.introduce_topic(npc, "the zombies", &world));
        assert_eq!(event.phase(), ConversationPhase::NeedTopic);
    }

    #[test]
    fn responded_this_round_prevents_double_speaking() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let mut lee = Character::new("Lee", "desc", area);
        lee.controllable = true;
        let lee = world.add_character(lee);
        let kenny = world.add_character(Character::new("Kenny", "desc", area));

        let mut event = ConversationEvent::new(area, vec![lee, kenny]);
        assert!(event.introduce_topic(lee, "the zombies", &world));
        event.begin_npc_responses();
        assert!(event.npc_can_respond(kenny));
        event.mark_responded(kenny);
        assert!(!event.npc_can_respond(kenny));
    }
}
