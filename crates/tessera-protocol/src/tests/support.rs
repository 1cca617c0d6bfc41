//! Shared sample documents and token helpers.

use crate::deserializer::{Flow, MessageDeserializer, Token};

pub(super) const MOVE_TRANSACTION: &str =
    r#"{"uid":1,"type":"transaction","commands":[{"move":[1,2]}]}"#;
pub(super) const MOVE_TRANSACTION_SWAPPED: &str =
    r#"{"type":"transaction","uid":1,"commands":[{"move":[1,2]}]}"#;
pub(super) const INDIRECT_ARGUMENT: &str =
    r#"{"uid":2,"type":"transaction","commands":[{"copy":[{"pos":0}]}]}"#;
pub(super) const FLAGGED_TRANSACTION: &str =
    r#"{"uid":3,"type":"transaction","commands":[],"flags":{"exec":true,"register":"foo"}}"#;
pub(super) const MIXED_COMMANDS: &str = r#"{"uid":4,"type":"transaction","commands":[{"a":[]},{},{"b":2},{"c":[{"pos":1},"x",null,true]}]}"#;
pub(super) const EVENT: &str = r#"{"type":"event","event_name":"foo","event_value":42}"#;
pub(super) const EVENT_REORDERED: &str = r#"{"event_value":42,"event_name":"foo","type":"event"}"#;
pub(super) const MISPLACED_KEY: &str =
    r#"{"uid":5,"type":"transaction","commands":[{"move":[{"type":1}]}]}"#;

/// Looks up a sample document by the name used in feature files.
pub(super) fn sample(name: &str) -> Option<&'static str> {
    let document = match name {
        "move transaction" => MOVE_TRANSACTION,
        "swapped move transaction" => MOVE_TRANSACTION_SWAPPED,
        "indirect argument" => INDIRECT_ARGUMENT,
        "flagged transaction" => FLAGGED_TRANSACTION,
        "mixed commands" => MIXED_COMMANDS,
        "event" => EVENT,
        "reordered event" => EVENT_REORDERED,
        "misplaced key" => MISPLACED_KEY,
        _ => return None,
    };
    Some(document)
}

/// Token stream of [`MOVE_TRANSACTION`].
pub(super) fn move_tokens() -> Vec<Token<'static>> {
    vec![
        Token::StartMap,
        Token::MapKey("uid"),
        Token::Int(1),
        Token::MapKey("type"),
        Token::String("transaction"),
        Token::MapKey("commands"),
        Token::StartArray,
        Token::StartMap,
        Token::MapKey("move"),
        Token::StartArray,
        Token::Int(1),
        Token::Int(2),
        Token::EndArray,
        Token::EndMap,
        Token::EndArray,
        Token::EndMap,
    ]
}

/// Transaction whose command array is empty.
pub(super) fn no_command_tokens() -> Vec<Token<'static>> {
    vec![
        Token::StartMap,
        Token::MapKey("commands"),
        Token::StartArray,
        Token::EndArray,
        Token::EndMap,
    ]
}

/// Transaction with a listed, an implicit-count and an empty command entry.
pub(super) fn many_command_tokens() -> Vec<Token<'static>> {
    vec![
        Token::StartMap,
        Token::MapKey("uid"),
        Token::Int(7),
        Token::MapKey("commands"),
        Token::StartArray,
        Token::StartMap,
        Token::MapKey("push"),
        Token::StartArray,
        Token::String("x"),
        Token::EndArray,
        Token::EndMap,
        Token::StartMap,
        Token::MapKey("pop"),
        Token::Int(2),
        Token::EndMap,
        Token::StartMap,
        Token::EndMap,
        Token::EndArray,
        Token::EndMap,
    ]
}

/// Feeds every token, collecting the flow returned for each.
pub(super) fn feed_all(machine: &mut MessageDeserializer, tokens: &[Token<'_>]) -> Vec<Flow> {
    tokens.iter().map(|token| machine.feed(*token)).collect()
}
