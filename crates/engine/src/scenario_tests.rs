//! End-to-end pipeline scenarios (spec.md §8), driven through mocked
//! collaborators. Kept as an in-crate `#[cfg(test)]` module (the teacher's
//! own convention, e.g. `use_cases::movement::tests`) rather than a
//! `tests/` integration crate, since the ports' `mockall::automock` is only
//! generated under `#[cfg(test)]` and wouldn't be visible to a separate
//! integration-test binary.

use outbreak_domain::entities::{Area, Character};
use outbreak_domain::World;
use outbreak_shared::{ActionKind, RawAction, Token};

use crate::config::EngineConfig;
use crate::pipeline::{run_turn, Collaborators};
use crate::ports::conversation::MockConversationPort;
use crate::ports::intent_parser::MockIntentParserPort;
use crate::ports::output_validator::MockOutputValidatorPort;
use crate::ports::precheck::MockPrecheckPort;
use crate::ports::storytelling::MockStorytellingPort;
use crate::ports::undo_selector::MockUndoSelectorPort;
use crate::ports::PrecheckLabel;
use crate::session::GameSession;

fn clear_collaborators(parsed: Vec<RawAction>) -> Collaborators {
    let mut precheck = MockPrecheckPort::new();
    precheck.expect_classify().returning(|_| PrecheckLabel::Clear);

    let mut intent_parser = MockIntentParserPort::new();
    intent_parser.expect_parse().returning(move |_, _| parsed.clone());

    let mut storytelling = MockStorytellingPort::new();
    storytelling
        .expect_narrate()
        .returning(|_, _, world_result| world_result.to_string());

    let mut output_validator = MockOutputValidatorPort::new();
    output_validator.expect_validate().returning(|_, _| true);

    let conversation = MockConversationPort::new();
    let undo_selector = MockUndoSelectorPort::new();

    Collaborators {
        precheck: Box::new(precheck),
        intent_parser: Box::new(intent_parser),
        undo_selector: Box::new(undo_selector),
        conversation: Box::new(conversation),
        storytelling: Box::new(storytelling),
        output_validator: Box::new(output_validator),
    }
}

#[tokio::test]
async fn a_simple_move_is_executed_and_narrated() {
    let mut world = World::new("Test");
    let start = world.add_area(Area::new("Front Entrance", "desc", false));
    let dest = world.add_area(Area::new("Main Store", "desc", false));
    world.link_areas("doorway", start, dest);
    let mut lee = Character::new("Lee", "desc", start);
    lee.controllable = true;
    let lee = world.add_character(lee);

    let mut session = GameSession::new(world, EngineConfig::default(), lee, None);

    let mut raw = RawAction::new(ActionKind::Move);
    raw.location = Token::Name("Main Store".to_string());
    let collaborators = clear_collaborators(vec![raw]);

    let narration = run_turn(&mut session, &collaborators, "go to the main store").await;

    assert!(narration.contains("Lee moves"), "unexpected narration: {narration}");
    assert_eq!(session.world.character(lee).unwrap().current_area, dest);
}

#[tokio::test]
async fn harming_a_friendly_npc_asks_for_confirmation_then_executes() {
    let mut world = World::new("Test");
    let area = world.add_area(Area::new("Main Store", "desc", false));
    let mut lee = Character::new("Lee", "desc", area);
    lee.controllable = true;
    let lee = world.add_character(lee);
    let kenny = world.add_character(Character::new("Kenny", "desc", area));

    let mut session = GameSession::new(world, EngineConfig::default(), lee, None);

    let mut raw = RawAction::new(ActionKind::Harm);
    raw.target = Token::Name("Kenny".to_string());
    let collaborators = clear_collaborators(vec![raw]);

    let prompt = run_turn(&mut session, &collaborators, "hit kenny").await;
    assert!(prompt.contains("Do I understand correctly"), "unexpected prompt: {prompt}");
    assert!(session.world.character(kenny).unwrap().alive);

    let narration = run_turn(&mut session, &collaborators, "yes").await;
    assert!(narration.contains("Kenny"), "unexpected narration: {narration}");
    assert!(session.world.character(kenny).unwrap().health < 100);
}
