//! Turn pipeline orchestrator (spec.md §4.8): the only place that
//! synthesizes user-visible text (spec.md §7 "propagation").

use outbreak_domain::{CharacterId, World};
use outbreak_shared::token::{area_uid_token, character_uid_token, item_uid_token};
use outbreak_shared::{ActionEnvelope, ActionKind, EntityRef, WorldView};

use crate::execute::StepOrigin;
use crate::knowledge_refresh::refresh_known_state;
use crate::ports::{
    ConversationExtras, ConversationPort, IntentParserPort, OutputMode, OutputValidatorPort, PrecheckLabel,
    PrecheckPort, StorytellingPort, UndoSelectorPort,
};
use crate::resolve::resolve_action;
use crate::session::{GameSession, PendingState};
use crate::snapshot::{apply_snapshot_at, push_snapshot};
use crate::validate::validate_sequence;
use crate::win_loss::{self, Outcome};

/// The engine's six natural-language collaborators, bundled together so the
/// pipeline takes one argument instead of six (spec.md §6.1).
pub struct Collaborators {
    pub precheck: Box<dyn PrecheckPort>,
    pub intent_parser: Box<dyn IntentParserPort>,
    pub undo_selector: Box<dyn UndoSelectorPort>,
    pub conversation: Box<dyn ConversationPort>,
    pub storytelling: Box<dyn StorytellingPort>,
    pub output_validator: Box<dyn OutputValidatorPort>,
}

fn is_affirmative(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "yes" | "yeah" | "yep" | "yup" | "y" | "sure" | "ok" | "okay" | "confirm"
    )
}

fn is_negative(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "no" | "nope" | "n" | "cancel" | "stop" | "nevermind" | "never mind"
    )
}

fn build_world_view(world: &World, actor: CharacterId, previous_narration: Option<String>) -> WorldView {
    let Some(actor_ref) = world.characters.get(&actor) else {
        return WorldView::new();
    };
    let areas = actor_ref
        .known_areas
        .iter()
        .filter_map(|id| world.areas.get(id))
        .map(|a| EntityRef {
            uid: area_uid_token(a.uid),
            name: a.name.clone(),
        })
        .collect();
    let mut characters: Vec<EntityRef> = actor_ref
        .known_people
        .iter()
        .filter_map(|id| world.characters.get(id))
        .map(|c| EntityRef {
            uid: character_uid_token(c.uid),
            name: c.name.clone(),
        })
        .collect();
    characters.push(EntityRef {
        uid: character_uid_token(actor),
        name: actor_ref.name.clone(),
    });
    let items = actor_ref
        .known_items
        .iter()
        .filter_map(|id| world.items.get(id))
        .map(|i| EntityRef {
            uid: item_uid_token(i.uid),
            name: i.name.clone(),
        })
        .collect();
    WorldView {
        areas,
        characters,
        items,
        previous_narration,
    }
}

fn target_name(world: &World, id: Option<CharacterId>) -> String {
    id.and_then(|t| world.characters.get(&t))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "someone".to_string())
}

/// Short human description of an action for the risky-confirmation prompt
/// and for the storytelling port's `recognized_action` argument.
fn describe_action(action: &ActionEnvelope, world: &World) -> String {
    match action.kind {
        ActionKind::Harm => format!("harm {}", target_name(world, action.target)),
        ActionKind::Move => {
            let area = action
                .location
                .and_then(|a| world.areas.get(&a))
                .map(|a| a.name.clone())
                .unwrap_or_else(|| "that place".to_string());
            format!("move to {area}")
        }
        ActionKind::Search => format!("search {}", target_name(world, action.target)),
        ActionKind::Steal => format!("steal from {}", target_name(world, action.target)),
        ActionKind::DoNothing => "do nothing".to_string(),
        ActionKind::AskAction => format!(
            "ask {} to {}",
            target_name(world, action.target),
            action.requested_action.map(|k| k.as_str()).unwrap_or("something")
        ),
        other => other.as_str().to_string(),
    }
}

fn is_friendly_to(actor: CharacterId, other: CharacterId, world: &World) -> bool {
    match (world.characters.get(&actor), world.characters.get(&other)) {
        (Some(a), Some(o)) => o.alive && !a.is_hostile_toward(o) && !o.is_hostile_toward(a),
        _ => false,
    }
}

/// Risky patterns (spec.md §4.8 step 7): harm a friendly or self, move to
/// the current area, search/steal a friendly alive NPC, do_nothing, or an
/// `ask_action` asking for one of those.
fn is_risky(action: &ActionEnvelope, world: &World) -> bool {
    match action.kind {
        ActionKind::Harm => {
            let Some(target) = action.target else { return false };
            target == action.actor || is_friendly_to(action.actor, target, world)
        }
        ActionKind::Move => {
            action.location.is_some()
                && action.location == world.characters.get(&action.actor).map(|c| c.current_area)
        }
        ActionKind::Search | ActionKind::Steal => action
            .target
            .map(|t| is_friendly_to(action.actor, t, world))
            .unwrap_or(false),
        ActionKind::DoNothing => true,
        ActionKind::AskAction => {
            let Some(requested) = action.requested_action else { return false };
            let mut synthetic = action.clone();
            synthetic.kind = requested;
            is_risky(&synthetic, world)
        }
        _ => false,
    }
}

fn merge_patch(original: &ActionEnvelope, patch: &ActionEnvelope) -> ActionEnvelope {
    let mut merged = original.clone();
    if patch.target.is_some() {
        merged.target = patch.target;
    }
    if patch.indirect_target.is_some() {
        merged.indirect_target = patch.indirect_target;
    }
    if patch.item.is_some() {
        merged.item = patch.item;
    }
    if patch.location.is_some() {
        merged.location = patch.location;
    }
    if patch.topic.is_some() {
        merged.topic = patch.topic.clone();
    }
    merged
}

fn escape_regex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Whole-word, case-insensitive replacement of the player's true name with
/// "you" (spec.md §6.1, §9 open question: "requires whole-word
/// replacement").
fn scrub_player_name(text: &str, name: &str) -> String {
    if name.trim().is_empty() {
        return text.to_string();
    }
    let pattern = format!(r"(?i)\b{}\b", escape_regex(name));
    match regex_lite::Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, "you").into_owned(),
        Err(_) => text.to_string(),
    }
}

fn player_area(session: &GameSession) -> outbreak_domain::AreaId {
    session
        .world
        .characters
        .get(&session.player)
        .map(|c| c.current_area)
        .unwrap_or_default()
}

/// Runs one full pipeline turn for a single raw player input (spec.md
/// §4.8). Returns the text to show the player.
pub async fn run_turn(session: &mut GameSession, collaborators: &Collaborators, raw_input: &str) -> String {
    // Step 1: start-of-turn knowledge refresh; seed the undo stack.
    refresh_known_state(&mut session.world, session.player);
    if session.undo_stack.is_empty() {
        let area = player_area(session);
        push_snapshot(&mut session.undo_stack, &session.world, "(start)", area);
    }

    // Step 2: pending undo confirmation.
    if let PendingState::UndoConfirmation { index } = session.pending.clone() {
        session.clear_pending();
        if is_affirmative(raw_input) {
            if apply_snapshot_at(&mut session.undo_stack, &mut session.world, index) {
                refresh_known_state(&mut session.world, session.player);
                return "The world rewinds to that point.".to_string();
            }
            return "That undo couldn't be applied; nothing has changed.".to_string();
        }
        return "Undo cancelled.".to_string();
    }

    // Step 3: pending correction.
    if let PendingState::Correction {
        actions,
        failed_index,
        original_input: _,
    } = session.pending.clone()
    {
        session.clear_pending();
        let previous = None;
        let world_view = build_world_view(&session.world, session.player, previous);
        let raw_patch = collaborators.intent_parser.parse(raw_input, &world_view).await;
        let patch = raw_patch
            .first()
            .map(|raw| resolve_action(raw, session.player, &session.world));

        let mut merged = actions.clone();
        if let (Some(patch), Some(slot)) = (patch, merged.get_mut(failed_index - 1)) {
            *slot = merge_patch(slot, &patch);
        }

        match validate_sequence(&merged, &session.world, &session.events) {
            Ok(()) => return execute_and_narrate(session, collaborators, raw_input, merged).await,
            Err(_) => {
                return collaborators
                    .conversation
                    .respond(raw_input, Some("impossible"), &ConversationExtras::default())
                    .await;
            }
        }
    }

    // Step 4: pending risky-action confirmation.
    if let PendingState::RiskyConfirmation {
        actions,
        original_input: _,
    } = session.pending.clone()
    {
        session.clear_pending();
        if is_affirmative(raw_input) {
            return execute_and_narrate(session, collaborators, raw_input, actions).await;
        }
        return "Understood, cancelling that.".to_string();
    }

    // Step 5: precheck.
    let label = collaborators.precheck.classify(raw_input).await;
    match label {
        PrecheckLabel::Undo => {
            if session.undo_stack.is_empty() {
                return "There's nothing to undo yet.".to_string();
            }
            let k = collaborators.undo_selector.select(raw_input, &session.undo_stack).await;
            let k = k.min(session.undo_stack.len());
            if k == 0 {
                return "Never mind, then.".to_string();
            }
            session.pending = PendingState::UndoConfirmation { index: k };
            return format!(
                "Do I understand correctly that you want to undo back to turn {k}? Write yes to continue, anything else to cancel."
            );
        }
        PrecheckLabel::Question | PrecheckLabel::Long | PrecheckLabel::Insufficient | PrecheckLabel::Impossible => {
            let world_view = build_world_view(&session.world, session.player, None);
            let label_str = match label {
                PrecheckLabel::Question => "question",
                PrecheckLabel::Long => "long",
                PrecheckLabel::Insufficient => "insufficient",
                PrecheckLabel::Impossible => "impossible",
                _ => unreachable!(),
            };
            let extras = ConversationExtras {
                world_view: Some(world_view),
                suggestion_mode: false,
            };
            let reply = collaborators.conversation.respond(raw_input, Some(label_str), &extras).await;
            if !reply.trim().is_empty() {
                return reply;
            }
            // Fall through to parsing (spec.md §4.8 step 5).
        }
        PrecheckLabel::Clear => {}
    }

    // Step 6: parse.
    let world_view = build_world_view(&session.world, session.player, None);
    let raw_actions = collaborators.intent_parser.parse(raw_input, &world_view).await;
    let mut actions: Vec<ActionEnvelope> = raw_actions
        .iter()
        .map(|raw| resolve_action(raw, session.player, &session.world))
        .collect();
    if actions.is_empty() {
        actions.push(ActionEnvelope::new(session.player, ActionKind::DoNothing));
    }

    // Step 7: confirmation gate on the first action.
    if let Some(first) = actions.first() {
        let bypass_harm = first.kind == ActionKind::Harm
            && first
                .target
                .map(|t| {
                    world_is_hostile(&session.world, session.player, t)
                })
                .unwrap_or(false);
        if !bypass_harm && is_risky(first, &session.world) {
            let description = describe_action(first, &session.world);
            session.pending = PendingState::RiskyConfirmation {
                actions,
                original_input: raw_input.to_string(),
            };
            return format!(
                "Do I understand correctly that you want to {description}? Write yes to continue, anything else to cancel."
            );
        }
    }

    // Step 8: validate the full sequence.
    if let Err(err) = validate_sequence(&actions, &session.world, &session.events) {
        if actions.len() == 1 {
            session.pending = PendingState::Correction {
                actions,
                failed_index: err.index,
                original_input: raw_input.to_string(),
            };
            return format!("{} What do you mean, exactly?", err.reason);
        }
        return "That sequence doesn't quite work. Could you try again, one step at a time?".to_string();
    }

    execute_and_narrate(session, collaborators, raw_input, actions).await
}

fn world_is_hostile(world: &World, actor: CharacterId, target: CharacterId) -> bool {
    match (world.characters.get(&actor), world.characters.get(&target)) {
        (Some(a), Some(t)) => a.is_hostile_toward(t) || t.is_hostile_toward(a),
        _ => false,
    }
}

/// Steps 9-13: execute, refresh knowledge, snapshot, narrate, and evaluate
/// end-of-game.
async fn execute_and_narrate(
    session: &mut GameSession,
    collaborators: &Collaborators,
    raw_input: &str,
    actions: Vec<ActionEnvelope>,
) -> String {
    let descriptions: Vec<String> = actions.iter().map(|a| describe_action(a, &session.world)).collect();

    // Step 9: execute via the turn handler.
    for action in &actions {
        session
            .turn_handler
            .queue_step(action.actor, action.clone(), StepOrigin::Player);
    }
    let mut rng = rand::thread_rng();
    let GameSession {
        world,
        events,
        turn_handler,
        config,
        ..
    } = session;
    let narrations = turn_handler.run_one_round(world, events, config, &mut rng);

    // Step 10: end-of-turn knowledge refresh.
    refresh_known_state(&mut session.world, session.player);

    // Step 11: push a snapshot unless identical to the previous one.
    let area = player_area(session);
    push_snapshot(&mut session.undo_stack, &session.world, raw_input, area);

    // Step 12: storytelling, with the output-validator retry loop.
    let world_result = narrations.join(" ");
    let recognized_action = descriptions.join("; ");
    let mut narration = world_result.clone();
    for attempt in 0..session.config.narration_retry_limit {
        let candidate = collaborators
            .storytelling
            .narrate(raw_input, &recognized_action, &world_result)
            .await;
        let candidate = scrub_player_name(&candidate, &player_name(session));
        if collaborators.output_validator.validate(OutputMode::Story, &candidate).await || attempt + 1 == session.config.narration_retry_limit {
            narration = candidate;
            break;
        }
    }

    session.completed_turns += 1;
    if session.completed_turns % u32::from(session.config.suggestion_cadence) == 0 {
        let world_view = build_world_view(&session.world, session.player, Some(narration.clone()));
        let extras = ConversationExtras {
            world_view: Some(world_view),
            suggestion_mode: true,
        };
        let suggestion = collaborators.conversation.respond(raw_input, None, &extras).await;
        if !suggestion.trim().is_empty() {
            narration = format!("{narration} {suggestion}");
        }
    }

    // Step 13: end-of-game evaluation.
    match win_loss::evaluate(&session.world, &session.config, session.player, session.win_npc) {
        Outcome::Win => format!("{narration} You've made it out alive. You win."),
        Outcome::Loss => format!("{narration} Your strength fails you. Game over."),
        Outcome::Ongoing => narration,
    }
}

fn player_name(session: &GameSession) -> String {
    session
        .world
        .characters
        .get(&session.player)
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character};

    #[test]
    fn risky_move_to_current_area_is_flagged() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let actor = world.add_character(Character::new("Lee", "desc", area));
        let mut action = ActionEnvelope::new(actor, ActionKind::Move);
        action.location = Some(area);
        assert!(is_risky(&action, &world));
    }

    #[test]
    fn harming_a_hostile_zombie_is_not_risky_by_this_check_alone() {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let actor = world.add_character(Character::new("Lee", "desc", area));
        let mut zombie = Character::new("Zombie", "desc", area);
        zombie.hostile = true;
        let zombie = world.add_character(zombie);
        let mut action = ActionEnvelope::new(actor, ActionKind::Harm);
        action.target = Some(zombie);
        assert!(!is_risky(&action, &world));
    }

    #[test]
    fn scrubbing_replaces_whole_word_occurrences_only() {
        let text = "Lee steps forward. Leeway is clear.";
        let scrubbed = scrub_player_name(text, "Lee");
        assert_eq!(scrubbed, "you steps forward. Leeway is clear.");
    }
}
