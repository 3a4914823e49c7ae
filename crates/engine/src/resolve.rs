//! Entity resolution (spec.md §4.2) and the knowledge visibility predicates
//! that need world context (spec.md §4.6 `can_see_*`, documented on
//! `outbreak_domain::knowledge::base` as living here).

use outbreak_domain::entities::item::ItemPlacement;
use outbreak_domain::{AreaId, CharacterId, ItemId, World};
use outbreak_shared::action::{ActionEnvelope, RawAction};
use outbreak_shared::token::{AREA_PREFIX, CHARACTER_PREFIX, ITEM_PREFIX};
use outbreak_shared::Token;

/// Resolves a [`Token`] against the search order from spec.md §4.2: current
/// area characters/items -> actor's party -> actor's inventory -> all world
/// entities. Uid-shaped tokens (recognized by prefix) are looked up
/// directly; name tokens are matched case-insensitively in that same order.
pub fn resolve_character(token: &Token, actor: CharacterId, world: &World) -> Option<CharacterId> {
    match token {
        Token::None => None,
        Token::Uid(uid) => strip_prefix(uid, CHARACTER_PREFIX)
            .and_then(|id| world.characters.keys().find(|c| c.to_string() == id))
            .copied(),
        Token::Name(name) => {
            let actor_area = world.characters.get(&actor).map(|c| c.current_area);
            let candidates = character_search_order(actor, actor_area, world);
            find_by_name(candidates, name, |id| &world.characters.get(id).unwrap().name)
        }
    }
}

pub fn resolve_item(token: &Token, actor: CharacterId, world: &World) -> Option<ItemId> {
    match token {
        Token::None => None,
        Token::Uid(uid) => strip_prefix(uid, ITEM_PREFIX)
            .and_then(|id| world.items.keys().find(|i| i.to_string() == id))
            .copied(),
        Token::Name(name) => {
            let actor_area = world.characters.get(&actor).map(|c| c.current_area);
            let candidates = item_search_order(actor, actor_area, world);
            find_by_name(candidates, name, |id| &world.items.get(id).unwrap().name)
        }
    }
}

pub fn resolve_area(token: &Token, world: &World) -> Option<AreaId> {
    match token {
        Token::None => None,
        Token::Uid(uid) => strip_prefix(uid, AREA_PREFIX)
            .and_then(|id| world.areas.keys().find(|a| a.to_string() == id))
            .copied(),
        Token::Name(name) => world
            .areas
            .iter()
            .find(|(_, area)| area.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id),
    }
}

fn strip_prefix(uid: &str, prefix: &str) -> Option<String> {
    uid.strip_prefix(prefix).map(str::to_string)
}

fn find_by_name<I, F>(order: Vec<I>, name: &str, namer: F) -> Option<I>
where
    I: Copy + Eq,
    F: Fn(&I) -> &str,
{
    order.into_iter().find(|id| namer(id).eq_ignore_ascii_case(name))
}

/// Characters visible to `actor` in search-order priority: co-present ->
/// party -> world.
fn character_search_order(
    actor: CharacterId,
    actor_area: Option<AreaId>,
    world: &World,
) -> Vec<CharacterId> {
    let mut seen = std::collections::HashSet::new();
    let mut order = Vec::new();

    if let Some(area) = actor_area.and_then(|a| world.areas.get(&a)) {
        for &c in &area.characters {
            if seen.insert(c) {
                order.push(c);
            }
        }
    }
    if let Some(character) = world.characters.get(&actor) {
        for &p in &character.party {
            if seen.insert(p) {
                order.push(p);
            }
        }
    }
    for &c in world.characters.keys() {
        if seen.insert(c) {
            order.push(c);
        }
    }
    order
}

/// Items visible to `actor`: floor items of current area -> party members'
/// inventories (treated as "actor's party" per spec.md §4.2) -> actor's
/// inventory -> all world items.
fn item_search_order(actor: CharacterId, actor_area: Option<AreaId>, world: &World) -> Vec<ItemId> {
    let mut seen = std::collections::HashSet::new();
    let mut order = Vec::new();

    if let Some(area) = actor_area.and_then(|a| world.areas.get(&a)) {
        for &i in &area.key_items {
            if seen.insert(i) {
                order.push(i);
            }
        }
    }
    if let Some(character) = world.characters.get(&actor) {
        for &p in &character.party {
            if let Some(partner) = world.characters.get(&p) {
                for &i in &partner.inventory {
                    if seen.insert(i) {
                        order.push(i);
                    }
                }
            }
        }
        for &i in &character.inventory {
            if seen.insert(i) {
                order.push(i);
            }
        }
    }
    for &i in world.items.keys() {
        if seen.insert(i) {
            order.push(i);
        }
    }
    order
}

/// Any of the three entity kinds an `inform` subject (carried in the
/// `topic` slot) can name (spec.md §4.3 "subject = item/area/person").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Character(CharacterId),
    Item(ItemId),
    Area(AreaId),
}

/// Resolves free text naming an inform subject against the same search
/// order as [`resolve_character`], trying each entity kind in turn.
pub fn resolve_subject(text: &str, actor: CharacterId, world: &World) -> Option<Subject> {
    let token = Token::parse(text);
    if let Some(c) = resolve_character(&token, actor, world) {
        return Some(Subject::Character(c));
    }
    if let Some(i) = resolve_item(&token, actor, world) {
        return Some(Subject::Item(i));
    }
    if let Some(a) = resolve_area(&token, world) {
        return Some(Subject::Area(a));
    }
    None
}

/// Resolves every slot of a [`RawAction`] into a live [`ActionEnvelope`]
/// (spec.md §4.1/§4.2). Unresolvable tokens become `None`; the validator is
/// responsible for rejecting actions that required a slot that failed to
/// resolve.
///
/// `inform`'s subject travels in the `topic` slot as raw text (spec.md §4.3:
/// "subject = item/area/person"); if it resolves to nothing in the world,
/// the action is silently rewritten to `talk` with a topic of "asking about
/// <raw subject>" (spec.md §4.3), keeping the resolved receiver.
pub fn resolve_action(raw: &RawAction, actor: CharacterId, world: &World) -> ActionEnvelope {
    let target = resolve_character(&raw.target, actor, world);

    if raw.action == outbreak_shared::ActionKind::Inform {
        let subject_text = raw.topic.clone().unwrap_or_default();
        if resolve_subject(&subject_text, actor, world).is_none() {
            let mut envelope = ActionEnvelope::new(actor, outbreak_shared::ActionKind::Talk);
            envelope.target = target;
            envelope.topic = Some(format!("asking about {subject_text}"));
            return envelope;
        }
    }

    ActionEnvelope {
        actor,
        kind: raw.action,
        requested_action: raw.requested_action,
        target,
        indirect_target: resolve_character(&raw.indirect_target, actor, world),
        item: resolve_item(&raw.item, actor, world),
        location: resolve_area(&raw.location, world),
        topic: raw.topic.clone(),
    }
}

/// Co-presence: same area as `viewer` (spec.md §4.6 `can_see_character`).
pub fn is_co_present(viewer: CharacterId, other: CharacterId, world: &World) -> bool {
    let Some(viewer_area) = world.characters.get(&viewer).map(|c| c.current_area) else {
        return false;
    };
    world
        .characters
        .get(&other)
        .map(|c| c.current_area == viewer_area)
        .unwrap_or(false)
}

/// "Truth view" of a character (spec.md §4.4 inform/talk rule and §GLOSSARY
/// "truth view"): co-present or in the viewer's party.
pub fn has_truth_view_of_character(viewer: CharacterId, other: CharacterId, world: &World) -> bool {
    is_co_present(viewer, other, world)
        || world
            .characters
            .get(&viewer)
            .map(|c| c.is_in_party_with(other))
            .unwrap_or(false)
}

/// Truth view of an item: in viewer's inventory/room, or in party (spec.md
/// §GLOSSARY).
pub fn has_truth_view_of_item(viewer: CharacterId, item: ItemId, world: &World) -> bool {
    let Some(item_ref) = world.items.get(&item) else {
        return false;
    };
    match item_ref.placement {
        ItemPlacement::Held(holder) => {
            holder == viewer
                || world
                    .characters
                    .get(&viewer)
                    .map(|c| c.is_in_party_with(holder))
                    .unwrap_or(false)
        }
        ItemPlacement::Floor(area) => {
            world.characters.get(&viewer).map(|c| c.current_area) == Some(area)
        }
        ItemPlacement::Unplaced => false,
    }
}

/// Truth view of an area: co-present in it right now.
pub fn has_truth_view_of_area(viewer: CharacterId, area: AreaId, world: &World) -> bool {
    world.characters.get(&viewer).map(|c| c.current_area) == Some(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character, Item};

    fn two_character_world() -> (World, CharacterId, CharacterId) {
        let mut world = World::new("Test");
        let area = world.add_area(Area::new("Main Store", "desc", false));
        let actor = world.add_character(Character::new("Lee", "desc", area));
        let other = world.add_character(Character::new("Clementine", "desc", area));
        (world, actor, other)
    }

    #[test]
    fn resolves_co_present_character_by_name() {
        let (world, actor, other) = two_character_world();
        let resolved = resolve_character(&Token::Name("Clementine".into()), actor, &world);
        assert_eq!(resolved, Some(other));
    }

    #[test]
    fn resolves_character_by_uid_token() {
        let (world, actor, other) = two_character_world();
        let token = Token::Uid(format!("{CHARACTER_PREFIX}{other}"));
        assert_eq!(resolve_character(&token, actor, &world), Some(other));
    }

    #[test]
    fn unresolvable_name_returns_none() {
        let (world, actor, _other) = two_character_world();
        assert_eq!(
            resolve_character(&Token::Name("Nobody".into()), actor, &world),
            None
        );
    }

    #[test]
    fn resolves_floor_item_in_current_area() {
        let (mut world, actor, _other) = two_character_world();
        let area = world.characters.get(&actor).unwrap().current_area;
        let axe = world.add_item_to_floor(Item::new("Fire Axe", "sharp"), area);
        assert_eq!(
            resolve_item(&Token::Name("Fire Axe".into()), actor, &world),
            Some(axe)
        );
    }
}
