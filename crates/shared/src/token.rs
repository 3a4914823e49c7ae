//! Parser-boundary token grammar (spec.md §4.1, §4.2, §9).
//!
//! Collaborators exchange textual slots, not typed ids. A token is either
//! the literal null sentinel, a uid (recognized by the `Char_`/`Item_`/
//! `Area_` prefix convention spec.md §4.2 names), or a bare name to be
//! resolved by `outbreak_engine::resolve`. Normalizing the sentinel
//! variants (`"0"`, `"None"`, `"null"`, `"none"`, `"nothing"`) happens here,
//! once, at the boundary (spec.md §9 "string-based field sentinels").

use serde::{Deserialize, Serialize};

pub const CHARACTER_PREFIX: &str = "Char_";
pub const ITEM_PREFIX: &str = "Item_";
pub const AREA_PREFIX: &str = "Area_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Uid(String),
    Name(String),
    None,
}

impl Token {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_null_sentinel(trimmed) {
            return Token::None;
        }
        if trimmed.starts_with(CHARACTER_PREFIX)
            || trimmed.starts_with(ITEM_PREFIX)
            || trimmed.starts_with(AREA_PREFIX)
        {
            return Token::Uid(trimmed.to_string());
        }
        Token::Name(trimmed.to_string())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Token::None)
    }
}

fn is_null_sentinel(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "" | "0" | "none" | "null" | "nothing"
    )
}

/// Formats a uid for the external token grammar. Internal ids are opaque
/// UUIDs; collaborators see a prefixed string so entity-resolution can use
/// the same prefix convention the spec describes, without the engine
/// leaking its internal id representation.
pub fn character_uid_token(id: outbreak_domain::CharacterId) -> String {
    format!("{CHARACTER_PREFIX}{id}")
}

pub fn item_uid_token(id: outbreak_domain::ItemId) -> String {
    format!("{ITEM_PREFIX}{id}")
}

pub fn area_uid_token(id: outbreak_domain::AreaId) -> String {
    format!("{AREA_PREFIX}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sentinels_normalize_to_none() {
        for sentinel in ["0", "None", "null", "none", "nothing", "NOTHING", ""] {
            assert_eq!(Token::parse(sentinel), Token::None, "sentinel: {sentinel}");
        }
    }

    #[test]
    fn prefixed_tokens_are_uids() {
        assert_eq!(
            Token::parse("Char_abc123"),
            Token::Uid("Char_abc123".into())
        );
    }

    #[test]
    fn unprefixed_tokens_are_names() {
        assert_eq!(Token::parse("Fire Axe"), Token::Name("Fire Axe".into()));
    }
}
