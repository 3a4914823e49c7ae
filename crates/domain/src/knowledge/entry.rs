//! Knowledge entry keyed by entity uid (spec.md §4.6).

use serde::{Deserialize, Serialize};

use crate::knowledge::snapshot::EntitySnapshot;
use crate::{AreaId, CharacterId, ItemId};

/// The uid a `KnowledgeEntry` is keyed by, tagged with what kind of entity
/// it refers to. A single `HashMap<Known, KnowledgeEntry>` (see
/// `KnowledgeBase`) replaces the three separate `known_items`/`known_areas`/
/// `known_people` uid sets for storage purposes; the three sets on
/// `Character` stay as a fast membership index (spec.md §3 still names them
/// explicitly) and are kept in sync by `KnowledgeBase::remember`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Known {
    Item(ItemId),
    Character(CharacterId),
    Area(AreaId),
}

/// Why an entry was recorded (spec.md §4.6 `refresh_known_state` reason tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnowledgeReason {
    Possession,
    Party,
    Presence,
    CoPresent,
    InRoom,
    Informed,
    Peeked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub uid: Known,
    pub name: String,
    pub reason: KnowledgeReason,
    pub snapshot: EntitySnapshot,
    pub is_outdated: bool,
}

impl KnowledgeEntry {
    pub fn new(
        uid: Known,
        name: impl Into<String>,
        reason: KnowledgeReason,
        snapshot: EntitySnapshot,
    ) -> Self {
        Self {
            uid,
            name: name.into(),
            reason,
            snapshot,
            is_outdated: false,
        }
    }
}
