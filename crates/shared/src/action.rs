//! Action vocabulary crossing the parser/validator/executor boundary
//! (spec.md §4.1, §9 "replace dynamic slot dicts with a tagged variant").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use outbreak_domain::{AreaId, CharacterId, ItemId};

use crate::token::Token;

/// The closed set of action kinds (spec.md §4.1). `Inform` may be silently
/// rewritten to `Talk` during validation (spec.md §4.3) — that happens to a
/// resolved `ActionEnvelope`, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Move,
    Talk,
    Search,
    PickUp,
    UseItem,
    GiveItem,
    EquipItem,
    UnequipItem,
    Harm,
    AskAction,
    Steal,
    JoinParty,
    QuitParty,
    DropItem,
    DoNothing,
    StopEvent,
    Examine,
    Inform,
}

impl ActionKind {
    pub const ALL: [ActionKind; 18] = [
        ActionKind::Move,
        ActionKind::Talk,
        ActionKind::Search,
        ActionKind::PickUp,
        ActionKind::UseItem,
        ActionKind::GiveItem,
        ActionKind::EquipItem,
        ActionKind::UnequipItem,
        ActionKind::Harm,
        ActionKind::AskAction,
        ActionKind::Steal,
        ActionKind::JoinParty,
        ActionKind::QuitParty,
        ActionKind::DropItem,
        ActionKind::DoNothing,
        ActionKind::StopEvent,
        ActionKind::Examine,
        ActionKind::Inform,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::Talk => "talk",
            ActionKind::Search => "search",
            ActionKind::PickUp => "pick_up",
            ActionKind::UseItem => "use_item",
            ActionKind::GiveItem => "give_item",
            ActionKind::EquipItem => "equip_item",
            ActionKind::UnequipItem => "unequip_item",
            ActionKind::Harm => "harm",
            ActionKind::AskAction => "ask_action",
            ActionKind::Steal => "steal",
            ActionKind::JoinParty => "join_party",
            ActionKind::QuitParty => "quit_party",
            ActionKind::DropItem => "drop_item",
            ActionKind::DoNothing => "do_nothing",
            ActionKind::StopEvent => "stop_event",
            ActionKind::Examine => "examine",
            ActionKind::Inform => "inform",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownActionKind;

impl FromStr for ActionKind {
    type Err = UnknownActionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or(UnknownActionKind)
    }
}

/// One parsed action block, slots still unresolved (spec.md §4.1 parser
/// contract). Missing/null fields normalize to `Token::None` at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAction {
    pub action: ActionKind,
    pub requested_action: Option<ActionKind>,
    pub target: Token,
    pub indirect_target: Token,
    pub item: Token,
    pub location: Token,
    pub topic: Option<String>,
}

impl RawAction {
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            requested_action: None,
            target: Token::None,
            indirect_target: Token::None,
            item: Token::None,
            location: Token::None,
            topic: None,
        }
    }
}

/// Resolved action: slots now point at live entities (spec.md §4.2
/// resolution happens before validation). Produced by
/// `outbreak_engine::resolve::resolve_action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    pub actor: CharacterId,
    pub kind: ActionKind,
    pub requested_action: Option<ActionKind>,
    pub target: Option<CharacterId>,
    pub indirect_target: Option<CharacterId>,
    pub item: Option<ItemId>,
    pub location: Option<AreaId>,
    pub topic: Option<String>,
}

impl ActionEnvelope {
    pub fn new(actor: CharacterId, kind: ActionKind) -> Self {
        Self {
            actor,
            kind,
            requested_action: None,
            target: None,
            indirect_target: None,
            item: None,
            location: None,
            topic: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_round_trips_through_str() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_action_kind_is_rejected() {
        assert!("fly".parse::<ActionKind>().is_err());
    }
}
