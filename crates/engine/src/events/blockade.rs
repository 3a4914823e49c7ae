//! BlockadeEvent (spec.md §4.5): tied to a `LinkingPoint`, gates `move`
//! across a directional area pair until resolved with a required item.

use outbreak_domain::{AreaId, CharacterId, EventId, ItemId, LinkingPointId, World};
use outbreak_shared::ActionKind;

use super::Event;

#[derive(Debug, Clone)]
pub struct BlockadeEvent {
    id: EventId,
    link: LinkingPointId,
    area_a: AreaId,
    area_b: AreaId,
    required_item_name: String,
    description: String,
    resolved_description: String,
    is_active: bool,
    is_blocking: bool,
    is_resolved: bool,
}

impl BlockadeEvent {
    pub fn new(
        link: LinkingPointId,
        area_a: AreaId,
        area_b: AreaId,
        required_item_name: impl Into<String>,
        description: impl Into<String>,
        resolved_description: impl Into<String>,
    ) -> Self {
        Self {
            id: EventId::new(),
            link,
            area_a,
            area_b,
            required_item_name: required_item_name.into(),
            description: description.into(),
            resolved_description: resolved_description.into(),
            is_active: true,
            is_blocking: true,
            is_resolved: false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.is_resolved
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    fn is_move_allowed(&self, from: AreaId, to: AreaId) -> bool {
        if !self.is_blocking {
            return true;
        }
        !((from == self.area_a && to == self.area_b) || (from == self.area_b && to == self.area_a))
    }

    /// Finds `required_item_name` in the actor's inventory, matched
    /// case-insensitively (spec.md §4.5 "actor holds that item").
    fn holds_required_item(&self, actor: CharacterId, world: &World) -> Option<ItemId> {
        let actor_ref = world.characters.get(&actor)?;
        actor_ref.inventory.iter().copied().find(|item_id| {
            world
                .items
                .get(item_id)
                .map(|item| item.name.eq_ignore_ascii_case(&self.required_item_name))
                .unwrap_or(false)
        })
    }
}

impl Event for BlockadeEvent {
    fn id(&self) -> EventId {
        self.id
    }

    fn name(&self) -> &str {
        "Blockade"
    }

    fn location(&self) -> AreaId {
        self.area_a
    }

    fn participants(&self) -> &[CharacterId] {
        &[]
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn is_active_allowed(&self, kind: ActionKind) -> bool {
        kind != ActionKind::Move
    }

    fn handle_action(
        &mut self,
        kind: ActionKind,
        args: &[String],
        actor: CharacterId,
        world: &mut World,
    ) -> Option<String> {
        if kind != ActionKind::UseItem || !self.is_active || self.is_resolved {
            return None;
        }
        let item_name = args.first()?;
        if !item_name.eq_ignore_ascii_case(&self.required_item_name) {
            return None;
        }
        let item_id = self.holds_required_item(actor, world)?;

        self.is_active = false;
        self.is_blocking = false;
        self.is_resolved = true;
        let description = self.resolved_description.clone();

        if let Ok(link) = world.linking_point_mut(self.link) {
            link.blocked = false;
        }

        let mut broke = false;
        if let Ok(item) = world.item(item_id) {
            if item.is_fragile() {
                broke = true;
            }
        }
        if broke {
            if let Ok(actor_ref) = world.character_mut(actor) {
                actor_ref.remove_item(item_id);
            }
            world.items.remove(&item_id);
        }

        Some(description)
    }

    fn resolve_if_needed(&mut self, _world: &World) {}

    fn resolve(&mut self) {
        self.is_active = false;
        self.is_blocking = false;
        self.is_resolved = true;
    }

    fn validate_movement(&self, from: AreaId, to: AreaId) -> Option<String> {
        if self.is_move_allowed(from, to) {
            None
        } else {
            Some(self.description.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_domain::entities::{Area, Character, Item};

    fn setup() -> (World, AreaId, AreaId, LinkingPointId, CharacterId) {
        let mut world = World::new("Test");
        let storage = world.add_area(Area::new("Storage Room", "desc", false));
        let pharmacy = world.add_area(Area::new("Pharmacy", "desc", false));
        let link = world.link_areas("Barricaded door", storage, pharmacy);
        let actor = world.add_character(Character::new("Lee", "desc", storage));
        (world, storage, pharmacy, link, actor)
    }

    #[test]
    fn blocks_movement_until_resolved_with_required_item() {
        let (mut world, storage, pharmacy, link, actor) = setup();
        let mut blockade = BlockadeEvent::new(
            link,
            storage,
            pharmacy,
            "Fire Axe",
            "The door is barricaded.",
            "You dismantle the barricade with the axe.",
        );
        assert!(blockade.validate_movement(storage, pharmacy).is_some());

        let axe = world.add_item_to_inventory(Item::new("Fire Axe", "sharp").with_robustness(80), actor);
        let result = blockade.handle_action(
            ActionKind::UseItem,
            &["Fire Axe".to_string()],
            actor,
            &mut world,
        );
        assert!(result.unwrap().contains("dismantle"));
        assert!(blockade.is_resolved());
        assert!(blockade.validate_movement(storage, pharmacy).is_none());
        assert!(world.item(axe).is_ok());
    }

    #[test]
    fn fragile_tool_breaks_on_resolving_use() {
        let (mut world, storage, pharmacy, link, actor) = setup();
        let mut blockade = BlockadeEvent::new(
            link,
            storage,
            pharmacy,
            "Crowbar",
            "blocked",
            "resolved",
        );
        let crowbar =
            world.add_item_to_inventory(Item::new("Crowbar", "rusty").with_robustness(10), actor);
        blockade.handle_action(ActionKind::UseItem, &["Crowbar".to_string()], actor, &mut world);
        assert!(world.item(crowbar).is_err());
    }
}
