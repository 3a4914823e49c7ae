//! Per-character knowledge map (spec.md §4.6).
//!
//! Composite visibility predicates (`can_see_area/character/item`) need
//! world context (current area, party membership) that does not belong to
//! this crate's no-I/O entities; they live in `outbreak_engine::resolve`,
//! which calls back into `knows()` here for the "known uid" leg of each
//! predicate.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::knowledge::entry::{Known, KnowledgeEntry};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Full history; entries are never deleted, only removed from `known_now`.
    entries: HashMap<Known, KnowledgeEntry>,
    known_now: HashSet<Known>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a snapshot and mark the uid currently known.
    pub fn remember(&mut self, entry: KnowledgeEntry) {
        self.known_now.insert(entry.uid);
        self.entries.insert(entry.uid, entry);
    }

    pub fn get(&self, uid: Known) -> Option<&KnowledgeEntry> {
        self.entries.get(&uid)
    }

    pub fn get_mut(&mut self, uid: Known) -> Option<&mut KnowledgeEntry> {
        self.entries.get_mut(&uid)
    }

    /// Retains the last snapshot for historical reads (spec.md §4.6); only
    /// drops current membership.
    pub fn forget(&mut self, uid: Known) {
        self.known_now.remove(&uid);
    }

    pub fn knows(&self, uid: Known) -> bool {
        self.known_now.contains(&uid)
    }

    pub fn iter_known(&self) -> impl Iterator<Item = &KnowledgeEntry> {
        self.known_now
            .iter()
            .filter_map(move |uid| self.entries.get(uid))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::entry::KnowledgeReason;
    use crate::knowledge::snapshot::{EntitySnapshot, ItemSnapshot};
    use crate::ItemId;

    fn item_entry(uid: crate::ItemId) -> KnowledgeEntry {
        KnowledgeEntry::new(
            Known::Item(uid),
            "Fire Axe",
            KnowledgeReason::Presence,
            EntitySnapshot::Item(ItemSnapshot {
                uid,
                name: "Fire Axe".into(),
                holder: None,
                position: None,
                equipped: false,
                equipped_slot: None,
                damage: 40,
                robustness: 80,
                description: "A sharp axe.".into(),
                abilities: vec![],
            }),
        )
    }

    #[test]
    fn forget_keeps_history_but_drops_membership() {
        let mut kb = KnowledgeBase::new();
        let id = ItemId::new();
        kb.remember(item_entry(id));
        assert!(kb.knows(Known::Item(id)));

        kb.forget(Known::Item(id));
        assert!(!kb.knows(Known::Item(id)));
        assert!(kb.get(Known::Item(id)).is_some());
    }
}
