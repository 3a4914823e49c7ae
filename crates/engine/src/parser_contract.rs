//! Deterministic parser-contract grammar (spec.md §4.1, SPEC_FULL.md §D):
//! splits raw text into one or more quoted/numbered `key:value,...` blocks
//! and extracts the canonical action fields. Grounded on
//! `InputProcessor.py`'s `process_player_input`/`_robust_extract_fields`.
//! Backs [`StubIntentParser`], an in-tree deterministic `IntentParserPort`
//! for tests and documentation examples — not a natural-language parser,
//! just the literal block grammar a collaborator may choose to speak.

use async_trait::async_trait;
use regex_lite::Regex;

use outbreak_shared::{ActionKind, RawAction, Token, WorldView};

use crate::ports::IntentParserPort;

/// Splits raw text into individual action blocks (spec.md §4.1): prefers
/// double-quoted `"...action:..."` segments, falls back to splitting on
/// `1.`/`2)`-style numbering, falls back to treating the whole string as
/// one block.
fn split_blocks(raw: &str) -> Vec<String> {
    let quoted = Regex::new(r#""([^"]*action[^"]*)""#).expect("valid pattern");
    let blocks: Vec<String> = quoted
        .captures_iter(raw)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect();
    if !blocks.is_empty() {
        return blocks;
    }

    let numbered = Regex::new(r"\d+\s*[.)]\s*").expect("valid pattern");
    let pieces: Vec<String> = numbered
        .split(raw)
        .map(|p| p.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|p| p.contains("action"))
        .collect();
    if !pieces.is_empty() {
        return pieces;
    }

    if raw.trim().is_empty() {
        Vec::new()
    } else {
        vec![raw.trim().to_string()]
    }
}

fn field_pattern() -> Regex {
    Regex::new(
        r"(?i)\b(action|requested_action|requested action|target|second_target|second target|indirect_target|indirect target|item|location|topic_of_conversation|topic)\b\s*[:=]\s*([^,;]*)",
    )
    .expect("valid pattern")
}

fn normalize_key(raw_key: &str) -> &'static str {
    match raw_key.to_ascii_lowercase().replace('_', " ").as_str() {
        "requested action" => "requested_action",
        "second target" | "indirect target" => "indirect_target",
        "topic of conversation" | "topic" => "topic",
        "target" => "target",
        "item" => "item",
        "location" => "location",
        _ => "action",
    }
}

/// Parses one block's `key:value,...` pairs into a [`RawAction`] (spec.md
/// §4.1). `investigate` is an alias for `search` (`InputProcessor.py`); a
/// present `requested_action` with no recognized top-level action promotes
/// the block to `ask_action` (`InputProcessor.py` "only auto-ask if there's
/// a sensible top-level action").
fn parse_block(block: &str) -> RawAction {
    let mut action_raw = String::new();
    let mut requested_raw = String::new();
    let mut target = Token::None;
    let mut indirect_target = Token::None;
    let mut item = Token::None;
    let mut location = Token::None;
    let mut topic: Option<String> = None;

    for capture in field_pattern().captures_iter(block) {
        let key = normalize_key(&capture[1]);
        let value = capture[2].trim().trim_matches(|c| c == '"' || c == '\'');
        match key {
            "action" => action_raw = value.to_ascii_lowercase().replace(' ', "_"),
            "requested_action" => requested_raw = value.to_ascii_lowercase().replace(' ', "_"),
            "target" => target = Token::parse(value),
            "indirect_target" => indirect_target = Token::parse(value),
            "item" => item = Token::parse(value),
            "location" => location = Token::parse(value),
            "topic" => topic = (!value.is_empty()).then(|| value.to_string()),
            _ => {}
        }
    }

    if action_raw == "investigate" {
        action_raw = "search".to_string();
    }
    if requested_raw == "investigate" {
        requested_raw = "search".to_string();
    }

    let mut action: ActionKind = action_raw.parse().unwrap_or(ActionKind::DoNothing);
    let requested_action: Option<ActionKind> = requested_raw.parse().ok();

    if requested_action.is_some()
        && !matches!(
            action,
            ActionKind::AskAction
                | ActionKind::Talk
                | ActionKind::Move
                | ActionKind::Harm
                | ActionKind::Search
                | ActionKind::PickUp
        )
    {
        action = ActionKind::AskAction;
    }

    RawAction {
        action,
        requested_action,
        target,
        indirect_target,
        item,
        location,
        topic,
    }
}

/// Parses free-form text containing one or more parser-contract blocks
/// (spec.md §4.1). Text with no recognizable blocks parses to an empty
/// list; the pipeline's fail-open fallback to `do_nothing` (spec.md §5) is
/// the caller's responsibility, not this function's.
pub fn parse_blocks(raw: &str) -> Vec<RawAction> {
    split_blocks(raw).iter().map(|block| parse_block(block)).collect()
}

/// Deterministic, non-LLM [`IntentParserPort`] that speaks the literal
/// parser-contract grammar instead of natural language — useful for tests
/// and for embeddings that want a collaborator with no LLM dependency.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubIntentParser;

#[async_trait]
impl IntentParserPort for StubIntentParser {
    async fn parse(&self, text: &str, _world_view: &WorldView) -> Vec<RawAction> {
        parse_blocks(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_quoted_action_block() {
        let actions = parse_blocks(r#"1. "action:move,location:Main Store""#);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, ActionKind::Move);
        assert_eq!(actions[0].location, Token::Name("Main Store".to_string()));
    }

    #[test]
    fn investigate_is_an_alias_for_search() {
        let actions = parse_blocks("action:investigate,target:Kenny");
        assert_eq!(actions[0].action, ActionKind::Search);
    }

    #[test]
    fn a_requested_action_attached_to_a_sensible_top_level_action_is_kept() {
        let actions = parse_blocks("action:talk,requested_action:give_item,target:Kenny,item:Fire Axe");
        assert_eq!(actions[0].action, ActionKind::Talk);
        assert_eq!(actions[0].requested_action, Some(ActionKind::GiveItem));
    }

    #[test]
    fn an_unrecognized_top_level_action_with_a_request_promotes_to_ask_action() {
        let actions = parse_blocks("action:nonsense,requested_action:harm,target:Kenny");
        assert_eq!(actions[0].action, ActionKind::AskAction);
        assert_eq!(actions[0].requested_action, Some(ActionKind::Harm));
    }

    #[test]
    fn empty_input_parses_to_no_actions() {
        assert!(parse_blocks("   ").is_empty());
    }

    #[test]
    fn multiple_numbered_blocks_each_parse_independently() {
        let actions = parse_blocks("1. action:move,location:Pharmacy 2. action:pick_up,item:First Aid Kit");
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].action, ActionKind::Move);
        assert_eq!(actions[1].action, ActionKind::PickUp);
    }
}
