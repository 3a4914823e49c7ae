//! Per-kind executor handlers (spec.md §4.4): each produces narration and
//! mutates the world, matching the validator's per-kind split in
//! `crate::validate::rules`.

use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;

use outbreak_domain::entities::ability::names;
use outbreak_domain::entities::item::ItemPlacement;
use outbreak_domain::knowledge::{Known, KnowledgeReason};
use outbreak_domain::{AreaId, CharacterId, ItemId, World};
use outbreak_shared::{ActionEnvelope, ActionKind};

use crate::config::EngineConfig;
use crate::events::EventManager;
use crate::knowledge_refresh::{remember_area, remember_character, remember_item};
use crate::resolve::{has_truth_view_of_area, has_truth_view_of_character, has_truth_view_of_item, resolve_subject, Subject};

use super::{QueuedStep, StepOrigin};

#[derive(Debug, Clone, Default)]
pub struct ExecutionOutcome {
    pub narration: String,
    pub cascades: Vec<QueuedStep>,
}

impl ExecutionOutcome {
    fn text(narration: impl Into<String>) -> Self {
        Self {
            narration: narration.into(),
            cascades: Vec::new(),
        }
    }
}

/// Executes one resolved action (spec.md §4.4). `origin` distinguishes a
/// cascade-queued follow-move from a player-initiated one, since the
/// narration differs (spec.md §4.7: "follower move messages are normalized
/// to `<Name> follows to <Destination>.`").
#[allow(clippy::too_many_arguments)]
pub fn execute_action(
    action: &ActionEnvelope,
    origin: StepOrigin,
    world: &mut World,
    events: &mut EventManager,
    config: &EngineConfig,
    rng: &mut impl Rng,
) -> ExecutionOutcome {
    match action.kind {
        ActionKind::Move => execute_move(action, origin, world, events),
        ActionKind::Talk | ActionKind::Inform => execute_talk(action, world),
        ActionKind::Search => execute_search(action, world),
        ActionKind::PickUp => execute_pick_up(action, world),
        ActionKind::UseItem => execute_use_item(action, world, events, config),
        ActionKind::GiveItem => execute_give_item(action, world, config),
        ActionKind::EquipItem => execute_equip_item(action, world),
        ActionKind::UnequipItem => execute_unequip_item(action, world),
        ActionKind::Harm => execute_harm(action, world, events, config, rng),
        ActionKind::AskAction => execute_ask_action(action, origin, world, events, config, rng),
        ActionKind::Steal => execute_steal(action, world),
        ActionKind::JoinParty => execute_join_party(action, world, config),
        ActionKind::QuitParty => execute_quit_party(action, world),
        ActionKind::DropItem => execute_drop_item(action, world),
        ActionKind::DoNothing => ExecutionOutcome::text(format!(
            "{} does nothing.",
            name_of(world, action.actor)
        )),
        ActionKind::StopEvent => execute_stop_event(action, world, events),
        ActionKind::Examine => execute_search(action, world),
    }
}

fn name_of(world: &World, character: CharacterId) -> String {
    world
        .characters
        .get(&character)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Someone".to_string())
}

fn area_name(world: &World, area: AreaId) -> String {
    world
        .areas
        .get(&area)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| "an unknown place".to_string())
}

/// BFS across links, rejecting any edge an active blockade gates (spec.md
/// §4.4 move).
fn bfs_path(world: &World, events: &EventManager, from: AreaId, to: AreaId) -> Option<Vec<AreaId>> {
    if from == to {
        return Some(vec![from]);
    }
    let mut visited = HashSet::new();
    visited.insert(from);
    let mut queue = VecDeque::new();
    queue.push_back(vec![from]);
    while let Some(path) = queue.pop_front() {
        let current = *path.last().expect("path always has at least one area");
        for (neighbor, _link) in world.neighbors(current) {
            if visited.contains(&neighbor) || events.validate_movement(current, neighbor).is_some() {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(neighbor);
            if neighbor == to {
                return Some(next_path);
            }
            visited.insert(neighbor);
            queue.push_back(next_path);
        }
    }
    None
}

fn move_character(world: &mut World, character: CharacterId, from: AreaId, to: AreaId) {
    if let Ok(from_area) = world.area_mut(from) {
        from_area.remove_resident(character);
    }
    if let Ok(to_area) = world.area_mut(to) {
        to_area.add_resident(character);
    }
    if let Ok(character_ref) = world.character_mut(character) {
        character_ref.current_area = to;
    }
}

fn execute_move(
    action: &ActionEnvelope,
    origin: StepOrigin,
    world: &mut World,
    events: &mut EventManager,
) -> ExecutionOutcome {
    let Some(destination) = action.location else {
        return ExecutionOutcome::text("There's nowhere specified to go.");
    };
    let Some(start) = world.characters.get(&action.actor).map(|c| c.current_area) else {
        return ExecutionOutcome::text("You aren't anywhere to move from.");
    };
    let Some(path) = bfs_path(world, events, start, destination) else {
        return ExecutionOutcome::text("There's no way to get there from here.");
    };

    if origin == StepOrigin::GroupMove {
        if let Some(&last) = path.last() {
            move_character(world, action.actor, start, last);
            events.check_for_event_triggers_after_action(action.actor, world);
        }
        return ExecutionOutcome::text(format!(
            "{} follows to {}.",
            name_of(world, action.actor),
            area_name(world, destination)
        ));
    }

    let party_followers: Vec<CharacterId> = world
        .characters
        .get(&action.actor)
        .map(|c| c.party.clone())
        .unwrap_or_default()
        .into_iter()
        .filter(|p| {
            world
                .characters
                .get(p)
                .map(|pc| pc.alive && pc.current_area == start)
                .unwrap_or(false)
        })
        .collect();

    let mut lines = Vec::new();
    let mut current = path[0];
    for &next in &path[1..] {
        move_character(world, action.actor, current, next);
        let mut line = format!(
            "{} moves from {} to {}.",
            name_of(world, action.actor),
            area_name(world, current),
            area_name(world, next)
        );
        if next == destination {
            let controllable = world
                .characters
                .get(&action.actor)
                .map(|c| c.controllable)
                .unwrap_or(false);
            if controllable {
                if let Ok(area_ref) = world.area(next) {
                    line.push(' ');
                    line.push_str(&area_ref.description);
                }
            }
        }
        lines.push(line);
        events.check_for_event_triggers_after_action(action.actor, world);
        current = next;
    }

    let cascades = party_followers
        .into_iter()
        .map(|follower| {
            let mut follow = ActionEnvelope::new(follower, ActionKind::Move);
            follow.location = Some(destination);
            QueuedStep {
                actor: follower,
                action: follow,
                origin: StepOrigin::GroupMove,
            }
        })
        .collect();

    ExecutionOutcome {
        narration: lines.join(" "),
        cascades,
    }
}

fn equipped_weapon_damage(world: &World, actor: CharacterId, config: &EngineConfig) -> u32 {
    world
        .characters
        .get(&actor)
        .and_then(|c| {
            c.equipment
                .hand_items()
                .filter_map(|item_id| world.items.get(&item_id))
                .map(|i| i.damage)
                .max()
        })
        .unwrap_or(config.default_weapon_damage)
}

fn execute_harm(
    action: &ActionEnvelope,
    world: &mut World,
    events: &mut EventManager,
    config: &EngineConfig,
    rng: &mut impl Rng,
) -> ExecutionOutcome {
    let Some(target) = action.target else {
        return ExecutionOutcome::text("There's no one to harm.");
    };
    let weapon_damage = equipped_weapon_damage(world, action.actor, config);
    let Some((strength, skill)) = world
        .characters
        .get(&action.actor)
        .map(|c| (c.stats.strength, c.stats.skill))
    else {
        return ExecutionOutcome::text("You aren't anywhere.");
    };
    let damage = ((weapon_damage as f64) * (1.0 + ((strength + skill) as f64) / 20.0))
        .round()
        .max(1.0) as u32;

    let mut killed = false;
    if let Ok(victim) = world.character_mut(target) {
        victim.apply_damage(damage);
        killed = !victim.alive;
    }
    if let Ok(victim) = world.character_mut(target) {
        if victim.friendships.get(action.actor) > 0 {
            victim.friendships.set_hostile(action.actor);
        }
    }

    let area = world
        .characters
        .get(&action.actor)
        .map(|c| c.current_area)
        .unwrap_or_else(|| world.characters.get(&target).map(|c| c.current_area).unwrap());

    apply_witness_penalties(world, area, action.actor, target, damage, killed);
    events.ensure_fight(area, &[action.actor, target]);

    let cascades = fight_cascade(world, action.actor, target, area, rng);

    let actor_name = name_of(world, action.actor);
    let victim_name = name_of(world, target);
    let mut narration = format!("{actor_name} hits {victim_name} for {damage} damage.");
    if killed {
        narration.push_str(&format!(" {victim_name} falls, dead."));
        if let Ok(area_mut) = world.area_mut(area) {
            area_mut
                .description
                .push_str(&format!(" {victim_name}'s body lies here."));
        }
    }
    ExecutionOutcome { narration, cascades }
}

/// Witness friendship penalty (spec.md §4.4 harm): `round(severity_base *
/// affinity) + round(kill_bonus * affinity)`, dampened by -2 if the witness
/// dislikes the victim. `severity_base` scales with damage as `1 +
/// round(4 * severity)` where severity is damage normalized to a 0..1 range
/// over full health.
fn apply_witness_penalties(
    world: &mut World,
    area: AreaId,
    attacker: CharacterId,
    victim: CharacterId,
    damage: u32,
    killed: bool,
) {
    let witnesses: Vec<CharacterId> = world
        .areas
        .get(&area)
        .map(|a| a.characters.clone())
        .unwrap_or_default()
        .into_iter()
        .filter(|&c| {
            c != attacker
                && c != victim
                && world.characters.get(&c).map(|w| w.alive).unwrap_or(false)
        })
        .collect();

    let severity = (damage as f64 / 100.0).clamp(0.0, 1.0);
    let severity_base = 1.0 + (4.0 * severity).round();
    let kill_bonus = if killed { 3.0 } else { 0.0 };

    for witness in witnesses {
        let Some(friendship_with_victim) = world
            .characters
            .get(&witness)
            .map(|w| w.friendships.get(victim))
        else {
            continue;
        };
        let affinity = (friendship_with_victim as f64 / 10.0).clamp(0.0, 1.0);
        let mut delta = (severity_base * affinity).round() + (kill_bonus * affinity).round();
        if friendship_with_victim < 5 {
            delta -= 2.0;
        }
        if let Ok(witness_ref) = world.character_mut(witness) {
            witness_ref.friendships.update(attacker, delta as i32);
        }
    }
}

/// Group cascade (spec.md §4.4 harm): every alive party member of the
/// attacker co-located with the fight is queued a `harm` step against a
/// random defender drawn from the victim's party-in-area (or the victim
/// itself if solo).
fn fight_cascade(
    world: &World,
    attacker: CharacterId,
    victim: CharacterId,
    area: AreaId,
    rng: &mut impl Rng,
) -> Vec<QueuedStep> {
    let attacker_party: Vec<CharacterId> = world
        .characters
        .get(&attacker)
        .map(|c| c.party.clone())
        .unwrap_or_default();
    let victim_party_in_area: Vec<CharacterId> = world
        .characters
        .get(&victim)
        .map(|c| c.party.clone())
        .unwrap_or_default()
        .into_iter()
        .filter(|p| {
            world
                .characters
                .get(p)
                .map(|pc| pc.alive && pc.current_area == area)
                .unwrap_or(false)
        })
        .collect();

    attacker_party
        .into_iter()
        .filter(|member| {
            world
                .characters
                .get(member)
                .map(|m| m.alive && m.current_area == area)
                .unwrap_or(false)
        })
        .map(|member| {
            let defender = if victim_party_in_area.is_empty() {
                victim
            } else {
                *victim_party_in_area
                    .choose(rng)
                    .expect("non-empty checked above")
            };
            let mut harm_action = ActionEnvelope::new(member, ActionKind::Harm);
            harm_action.target = Some(defender);
            QueuedStep {
                actor: member,
                action: harm_action,
                origin: StepOrigin::GoodAi,
            }
        })
        .collect()
}

fn execute_give_item(action: &ActionEnvelope, world: &mut World, config: &EngineConfig) -> ExecutionOutcome {
    let (Some(item), Some(recipient)) = (action.item, action.target) else {
        return ExecutionOutcome::text("There's nothing to give.");
    };
    let Some((friendship, health)) = world
        .characters
        .get(&recipient)
        .map(|c| (c.friendships.get(action.actor), c.health))
    else {
        return ExecutionOutcome::text("There's no one here to receive it.");
    };

    let warmly = friendship >= config.generous_friendship_threshold;
    let reluctantly = !warmly && health <= config.desperate_health_threshold;
    if !warmly && !reluctantly {
        return ExecutionOutcome::text(format!(
            "{} refuses to accept the {}.",
            name_of(world, recipient),
            world.items.get(&item).map(|i| i.name.clone()).unwrap_or_default()
        ));
    }

    if let Ok(giver) = world.character_mut(action.actor) {
        giver.remove_item(item);
    }
    if let Ok(recipient_ref) = world.character_mut(recipient) {
        recipient_ref.add_item(item);
        if warmly {
            recipient_ref.friendships.update(action.actor, 1);
        }
    }
    if let Ok(item_ref) = world.item_mut(item) {
        item_ref.placement = ItemPlacement::Held(recipient);
        item_ref.equipped = false;
    }
    try_auto_equip(world, recipient, item);

    let verb = if warmly { "gladly accepts" } else { "reluctantly accepts" };
    ExecutionOutcome::text(format!(
        "{} {} the {} from {}.",
        name_of(world, recipient),
        verb,
        world.items.get(&item).map(|i| i.name.clone()).unwrap_or_default(),
        name_of(world, action.actor)
    ))
}

fn try_auto_equip(world: &mut World, character: CharacterId, item: ItemId) {
    let Some(is_weapon) = world.items.get(&item).map(|i| i.damage > 0) else {
        return;
    };
    let Some(slot) = world.characters.get(&character).and_then(|c| c.free_slot_for(is_weapon)) else {
        return;
    };
    if let Ok(character_ref) = world.character_mut(character) {
        character_ref.equipment.equip(slot, item);
    }
    if let Ok(item_ref) = world.item_mut(item) {
        item_ref.equipped = true;
    }
}

fn execute_steal(action: &ActionEnvelope, world: &mut World) -> ExecutionOutcome {
    let (Some(item), Some(victim)) = (action.item, action.target) else {
        return ExecutionOutcome::text("There's nothing to steal.");
    };
    if let Ok(victim_ref) = world.character_mut(victim) {
        victim_ref.remove_item(item);
        victim_ref.friendships.update(action.actor, -1);
    }
    if let Ok(thief) = world.character_mut(action.actor) {
        thief.add_item(item);
    }
    if let Ok(item_ref) = world.item_mut(item) {
        item_ref.placement = ItemPlacement::Held(action.actor);
        item_ref.equipped = false;
    }
    try_auto_equip(world, action.actor, item);

    ExecutionOutcome::text(format!(
        "{} steals the {} from {}.",
        name_of(world, action.actor),
        world.items.get(&item).map(|i| i.name.clone()).unwrap_or_default(),
        name_of(world, victim)
    ))
}

fn execute_search(action: &ActionEnvelope, world: &mut World) -> ExecutionOutcome {
    if let Some(target) = action.target {
        return execute_search_person(action.actor, target, world);
    }
    let current_area = world.characters.get(&action.actor).map(|c| c.current_area);
    match action.location {
        Some(area) if Some(area) == current_area || action.location.is_none() => {
            execute_search_current_area(action.actor, area, world)
        }
        Some(area) => execute_search_adjacent_area(action.actor, area, world),
        None => {
            let Some(area) = current_area else {
                return ExecutionOutcome::text("You aren't anywhere.");
            };
            execute_search_current_area(action.actor, area, world)
        }
    }
}

fn execute_search_current_area(actor: CharacterId, area: AreaId, world: &mut World) -> ExecutionOutcome {
    remember_area(world, actor, area, KnowledgeReason::Presence);
    let items: Vec<ItemId> = world.areas.get(&area).map(|a| a.key_items.clone()).unwrap_or_default();
    let characters: Vec<CharacterId> = world
        .areas
        .get(&area)
        .map(|a| a.characters.iter().copied().filter(|c| *c != actor).collect())
        .unwrap_or_default();

    let mut item_lines = Vec::new();
    for item in &items {
        remember_item(world, actor, *item, KnowledgeReason::Presence);
        if let Some(i) = world.items.get(item) {
            item_lines.push(format!("{} (damage {}, robustness {})", i.name, i.damage, i.robustness));
        }
    }
    for character in &characters {
        remember_character(world, actor, *character, KnowledgeReason::CoPresent);
    }
    let character_names: Vec<String> = characters.iter().map(|c| name_of(world, *c)).collect();

    let mut narration = format!("{} searches {}.", name_of(world, actor), area_name(world, area));
    if !item_lines.is_empty() {
        narration.push_str(&format!(" Items here: {}.", item_lines.join(", ")));
    }
    if !character_names.is_empty() {
        narration.push_str(&format!(" Also here: {}.", character_names.join(", ")));
    }
    ExecutionOutcome::text(narration)
}

fn execute_search_adjacent_area(actor: CharacterId, area: AreaId, world: &mut World) -> ExecutionOutcome {
    let name = area_name(world, area);
    let characters: Vec<CharacterId> = world
        .areas
        .get(&area)
        .map(|a| a.characters.clone())
        .unwrap_or_default();

    remember_area(world, actor, area, KnowledgeReason::Peeked);
    for character in characters {
        remember_character(world, actor, character, KnowledgeReason::Peeked);
    }
    // A peek always marks its entries outdated, even though the data is
    // current at the moment it's recorded (spec.md §9 open question,
    // resolved: "yes, preserve").
    if let Some(entry) = world
        .characters
        .get_mut(&actor)
        .and_then(|c| c.knowledge.get_mut(Known::Area(area)))
    {
        entry.is_outdated = true;
    }

    ExecutionOutcome::text(format!("{} peeks into {} from afar.", name_of(world, actor), name))
}

fn execute_search_person(actor: CharacterId, target: CharacterId, world: &mut World) -> ExecutionOutcome {
    remember_character(world, actor, target, KnowledgeReason::CoPresent);
    let inventory: Vec<ItemId> = world.characters.get(&target).map(|c| c.inventory.clone()).unwrap_or_default();
    for item in &inventory {
        remember_item(world, actor, *item, KnowledgeReason::Presence);
    }
    let target_alive = world.characters.get(&target).map(|c| c.alive).unwrap_or(false);
    if target_alive {
        if let Ok(target_ref) = world.character_mut(target) {
            target_ref.friendships.update(actor, -1);
        }
    }

    let Some(target_ref) = world.characters.get(&target) else {
        return ExecutionOutcome::text("There's no one here to search.");
    };
    let item_names: Vec<String> = inventory
        .iter()
        .filter_map(|i| world.items.get(i))
        .map(|i| i.name.clone())
        .collect();
    ExecutionOutcome::text(format!(
        "{} searches {}. Health: {}. Carrying: {}.",
        name_of(world, actor),
        target_ref.name,
        target_ref.health,
        if item_names.is_empty() {
            "nothing".to_string()
        } else {
            item_names.join(", ")
        }
    ))
}

fn execute_pick_up(action: &ActionEnvelope, world: &mut World) -> ExecutionOutcome {
    let Some(item) = action.item else {
        return ExecutionOutcome::text("There's nothing to pick up.");
    };
    let Some(area) = world.characters.get(&action.actor).map(|c| c.current_area) else {
        return ExecutionOutcome::text("You aren't anywhere.");
    };
    if let Ok(area_mut) = world.area_mut(area) {
        area_mut.remove_key_item(item);
    }
    if let Ok(item_ref) = world.item_mut(item) {
        item_ref.placement = ItemPlacement::Held(action.actor);
    }
    if let Ok(actor) = world.character_mut(action.actor) {
        actor.add_item(item);
    }
    ExecutionOutcome::text(format!(
        "{} picks up the {}.",
        name_of(world, action.actor),
        world.items.get(&item).map(|i| i.name.clone()).unwrap_or_default()
    ))
}

fn execute_drop_item(action: &ActionEnvelope, world: &mut World) -> ExecutionOutcome {
    let Some(item) = action.item else {
        return ExecutionOutcome::text("There's nothing to drop.");
    };
    let Some(area) = world.characters.get(&action.actor).map(|c| c.current_area) else {
        return ExecutionOutcome::text("You aren't anywhere.");
    };
    if let Ok(actor) = world.character_mut(action.actor) {
        actor.remove_item(item);
    }
    if let Ok(item_ref) = world.item_mut(item) {
        item_ref.placement = ItemPlacement::Floor(area);
        item_ref.equipped = false;
    }
    if let Ok(area_mut) = world.area_mut(area) {
        area_mut.key_items.push(item);
    }
    ExecutionOutcome::text(format!(
        "{} drops the {}.",
        name_of(world, action.actor),
        world.items.get(&item).map(|i| i.name.clone()).unwrap_or_default()
    ))
}

fn execute_use_item(
    action: &ActionEnvelope,
    world: &mut World,
    events: &mut EventManager,
    config: &EngineConfig,
) -> ExecutionOutcome {
    let Some(item) = action.item else {
        return ExecutionOutcome::text("There's nothing to use.");
    };
    let item_name = world.items.get(&item).map(|i| i.name.clone()).unwrap_or_default();

    let event_response = events.handle_item_use(action.actor, &item_name, world);
    if !event_response.is_empty() {
        return ExecutionOutcome::text(event_response);
    }

    let has_medicate = world.items.get(&item).map(|i| i.has_ability(names::MEDICATE)).unwrap_or(false);
    if has_medicate {
        if let Some(target) = action.target {
            let target_alive = world.characters.get(&target).map(|c| c.alive).unwrap_or(false);
            if target_alive {
                if let Ok(target_ref) = world.character_mut(target) {
                    target_ref.heal(config.heal_amount);
                }
                return ExecutionOutcome::text(format!(
                    "{} uses the {} to heal {}.",
                    name_of(world, action.actor),
                    item_name,
                    name_of(world, target)
                ));
            }
        }
    }

    ExecutionOutcome::text(format!("{} uses the {}.", name_of(world, action.actor), item_name))
}

fn execute_equip_item(action: &ActionEnvelope, world: &mut World) -> ExecutionOutcome {
    let Some(item) = action.item else {
        return ExecutionOutcome::text("There's nothing to equip.");
    };
    let is_weapon = world.items.get(&item).map(|i| i.damage > 0).unwrap_or(false);
    let Some(slot) = world.characters.get(&action.actor).and_then(|c| c.free_slot_for(is_weapon)) else {
        return ExecutionOutcome::text("There's nowhere to equip that.");
    };
    let previous_occupant = if let Ok(actor) = world.character_mut(action.actor) {
        actor.equipment.equip(slot, item)
    } else {
        None
    };
    if let Some(previous) = previous_occupant {
        if let Ok(previous_item) = world.item_mut(previous) {
            previous_item.equipped = false;
        }
    }
    if let Ok(item_ref) = world.item_mut(item) {
        item_ref.equipped = true;
    }
    ExecutionOutcome::text(format!(
        "{} equips the {}.",
        name_of(world, action.actor),
        world.items.get(&item).map(|i| i.name.clone()).unwrap_or_default()
    ))
}

fn execute_unequip_item(action: &ActionEnvelope, world: &mut World) -> ExecutionOutcome {
    let Some(item) = action.item else {
        return ExecutionOutcome::text("There's nothing to unequip.");
    };
    if let Ok(actor) = world.character_mut(action.actor) {
        actor.equipment.unequip_item(item);
    }
    if let Ok(item_ref) = world.item_mut(item) {
        item_ref.equipped = false;
    }
    ExecutionOutcome::text(format!(
        "{} unequips the {}.",
        name_of(world, action.actor),
        world.items.get(&item).map(|i| i.name.clone()).unwrap_or_default()
    ))
}

fn execute_join_party(action: &ActionEnvelope, world: &mut World, config: &EngineConfig) -> ExecutionOutcome {
    let Some(other) = action.target else {
        return ExecutionOutcome::text("There's no one here to join with.");
    };
    let Some((friendship, actor_health)) = world
        .characters
        .get(&action.actor)
        .map(|c| (c.friendships.get(other), c.health))
    else {
        return ExecutionOutcome::text("You aren't anywhere.");
    };
    let other_health = world.characters.get(&other).map(|c| c.health).unwrap_or(0);
    if friendship < config.generous_friendship_threshold.max(5)
        || actor_health <= config.party_join_health_floor
        || other_health <= config.party_join_health_floor
    {
        return ExecutionOutcome::text(format!("{} isn't ready to join your party.", name_of(world, other)));
    }

    if let Ok(actor) = world.character_mut(action.actor) {
        actor.join_party(other);
    }
    if let Ok(other_ref) = world.character_mut(other) {
        other_ref.join_party(action.actor);
    }

    let actor_party: Vec<CharacterId> = world.characters.get(&action.actor).map(|c| c.party.clone()).unwrap_or_default();
    let actor_inventory: Vec<ItemId> = world.characters.get(&action.actor).map(|c| c.inventory.clone()).unwrap_or_default();
    let other_inventory: Vec<ItemId> = world.characters.get(&other).map(|c| c.inventory.clone()).unwrap_or_default();
    for member in &actor_party {
        remember_character(world, *member, other, KnowledgeReason::Party);
        remember_character(world, other, *member, KnowledgeReason::Party);
        for &item in &other_inventory {
            remember_item(world, *member, item, KnowledgeReason::Party);
        }
        for &item in &actor_inventory {
            remember_item(world, other, item, KnowledgeReason::Party);
        }
    }

    ExecutionOutcome::text(format!("{} joins your party.", name_of(world, other)))
}

fn execute_quit_party(action: &ActionEnvelope, world: &mut World) -> ExecutionOutcome {
    let Some(other) = action.target else {
        return ExecutionOutcome::text("There's no one to leave.");
    };
    if let Ok(actor) = world.character_mut(action.actor) {
        actor.leave_party(other);
    }
    if let Ok(other_ref) = world.character_mut(other) {
        other_ref.leave_party(action.actor);
    }
    ExecutionOutcome::text(format!("{} leaves your party.", name_of(world, other)))
}

/// Unified `inform`/`talk`-with-subject handler (spec.md §4.4). The subject
/// travels in `action.topic` as raw text for `Inform` (resolved afresh here,
/// since it could have changed between validation and execution); plain
/// `Talk` actions have no subject and just exchange conversational
/// pleasantries.
fn execute_talk(action: &ActionEnvelope, world: &mut World) -> ExecutionOutcome {
    let Some(receiver) = action.target else {
        return ExecutionOutcome::text("There's no one here to talk to.");
    };
    let Some(subject_text) = action.topic.clone() else {
        return ExecutionOutcome::text(format!("{} chats with {}.", name_of(world, action.actor), name_of(world, receiver)));
    };
    let Some(subject) = resolve_subject(&subject_text, action.actor, world) else {
        return ExecutionOutcome::text(format!(
            "{} asks {} about {}.",
            name_of(world, action.actor),
            name_of(world, receiver),
            subject_text
        ));
    };

    match subject {
        Subject::Character(who) => {
            let truth_view = has_truth_view_of_character(action.actor, who, world)
                || has_truth_view_of_character(receiver, who, world);
            sync_character_knowledge(world, action.actor, receiver, who, truth_view);
        }
        Subject::Item(item) => {
            let truth_view = has_truth_view_of_item(action.actor, item, world)
                || has_truth_view_of_item(receiver, item, world);
            sync_item_knowledge(world, action.actor, receiver, item, truth_view);
        }
        Subject::Area(area) => {
            let truth_view = has_truth_view_of_area(action.actor, area, world)
                || has_truth_view_of_area(receiver, area, world);
            sync_area_knowledge(world, action.actor, receiver, area, truth_view);
        }
    }

    ExecutionOutcome::text(format!(
        "{} tells {} about {}.",
        name_of(world, action.actor),
        name_of(world, receiver),
        subject_text
    ))
}

fn sync_character_knowledge(world: &mut World, giver: CharacterId, receiver: CharacterId, subject: CharacterId, truth_view: bool) {
    if truth_view {
        remember_character(world, giver, subject, KnowledgeReason::Informed);
        remember_character(world, receiver, subject, KnowledgeReason::Informed);
        clear_outdated(world, giver, Known::Character(subject));
        clear_outdated(world, receiver, Known::Character(subject));
        return;
    }
    let Some(entry) = world
        .characters
        .get(&giver)
        .and_then(|c| c.knowledge.get(Known::Character(subject)))
        .cloned()
    else {
        return;
    };
    if let Ok(receiver_ref) = world.character_mut(receiver) {
        let mut copied = entry;
        copied.is_outdated = true;
        receiver_ref.knowledge.remember(copied);
        receiver_ref.known_people.insert(subject);
    }
    mark_outdated(world, giver, Known::Character(subject));
}

fn sync_item_knowledge(world: &mut World, giver: CharacterId, receiver: CharacterId, subject: ItemId, truth_view: bool) {
    if truth_view {
        remember_item(world, giver, subject, KnowledgeReason::Informed);
        remember_item(world, receiver, subject, KnowledgeReason::Informed);
        clear_outdated(world, giver, Known::Item(subject));
        clear_outdated(world, receiver, Known::Item(subject));
        return;
    }
    let Some(entry) = world
        .characters
        .get(&giver)
        .and_then(|c| c.knowledge.get(Known::Item(subject)))
        .cloned()
    else {
        return;
    };
    if let Ok(receiver_ref) = world.character_mut(receiver) {
        let mut copied = entry;
        copied.is_outdated = true;
        receiver_ref.knowledge.remember(copied);
        receiver_ref.known_items.insert(subject);
    }
    mark_outdated(world, giver, Known::Item(subject));
}

fn sync_area_knowledge(world: &mut World, giver: CharacterId, receiver: CharacterId, subject: AreaId, truth_view: bool) {
    if truth_view {
        remember_area(world, giver, subject, KnowledgeReason::Informed);
        remember_area(world, receiver, subject, KnowledgeReason::Informed);
        clear_outdated(world, giver, Known::Area(subject));
        clear_outdated(world, receiver, Known::Area(subject));
        return;
    }
    let Some(entry) = world
        .characters
        .get(&giver)
        .and_then(|c| c.knowledge.get(Known::Area(subject)))
        .cloned()
    else {
        return;
    };
    if let Ok(receiver_ref) = world.character_mut(receiver) {
        let mut copied = entry;
        copied.is_outdated = true;
        receiver_ref.knowledge.remember(copied);
        receiver_ref.known_areas.insert(subject);
    }
    mark_outdated(world, giver, Known::Area(subject));
}

fn mark_outdated(world: &mut World, observer: CharacterId, uid: Known) {
    if let Some(entry) = world.characters.get_mut(&observer).and_then(|c| c.knowledge.get_mut(uid)) {
        entry.is_outdated = true;
    }
}

fn clear_outdated(world: &mut World, observer: CharacterId, uid: Known) {
    if let Some(entry) = world.characters.get_mut(&observer).and_then(|c| c.knowledge.get_mut(uid)) {
        entry.is_outdated = false;
    }
}

fn execute_ask_action(
    action: &ActionEnvelope,
    _origin: StepOrigin,
    world: &mut World,
    events: &mut EventManager,
    config: &EngineConfig,
    rng: &mut impl Rng,
) -> ExecutionOutcome {
    let Some(asked) = action.target else {
        return ExecutionOutcome::text("There's no one here to ask.");
    };
    let Some(requested) = action.requested_action else {
        return ExecutionOutcome::text(format!("{} doesn't know what you want.", name_of(world, asked)));
    };

    // Defaults (spec.md §4.4): receiver of talk/give is the asker; victim of
    // harm defaults to the asker.
    let mut mapped = action.clone();
    mapped.actor = asked;
    mapped.kind = requested;
    if mapped.target.is_none() {
        mapped.target = Some(action.actor);
    }

    execute_action(&mapped, StepOrigin::GoodAi, world, events, config, rng)
}

fn execute_stop_event(action: &ActionEnvelope, world: &World, events: &mut EventManager) -> ExecutionOutcome {
    let Some(area) = world.characters.get(&action.actor).map(|c| c.current_area) else {
        return ExecutionOutcome::text("There's nothing to stop.");
    };
    match events.resolve_event_for(action.actor, area) {
        Some(name) => ExecutionOutcome::text(format!("{name} is resolved.")),
        None => ExecutionOutcome::text("There's nothing here to stop.".to_string()),
    }
}
