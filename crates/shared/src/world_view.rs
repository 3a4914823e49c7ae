//! Read-only projection handed to the `IntentParser` collaborator
//! (spec.md §6.1: "a read-only snapshot of areas/characters/items (names +
//! uids) plus previous narration").

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub uid: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldView {
    pub areas: Vec<EntityRef>,
    pub characters: Vec<EntityRef>,
    pub items: Vec<EntityRef>,
    pub previous_narration: Option<String>,
}

impl WorldView {
    pub fn new() -> Self {
        Self::default()
    }
}
