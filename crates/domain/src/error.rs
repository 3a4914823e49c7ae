//! Unified error type for domain-layer operations.
//!
//! Keeps invariant violations (ownership, friendship range, party symmetry)
//! typed instead of `String`/`anyhow`, so callers in `outbreak-engine` can
//! match on the specific failure when it matters (e.g. distinguishing "not
//! found" from "constraint violated" when building a validator message).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("entity not found: {entity_type} {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("invalid equipment slot: {0}")]
    InvalidSlot(String),

    #[error("item is not owned by anyone (position XOR holder invariant violated): {0}")]
    UnownedItem(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    pub fn invalid_slot(msg: impl Into<String>) -> Self {
        Self::InvalidSlot(msg.into())
    }
}
