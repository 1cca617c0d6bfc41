//! Parser states and the key transition table.

use strum::Display;

use crate::keys;

/// Position of the deserializer within the message grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    /// Before the top-level map.
    #[default]
    Init,
    /// Inside the top-level map, expecting a key.
    Msg,
    /// Expecting the `uid` integer.
    Uid,
    /// Expecting the `type` literal.
    Type,
    /// Expecting the `commands` array.
    Commands,
    /// Expecting the `flags` map.
    Flags,
    /// Inside the flags map, expecting a key.
    FlagsMap,
    /// Expecting the `exec` boolean.
    FlagsExec,
    /// Expecting the `register` name.
    FlagsRegister,
    /// Expecting the event name.
    EventName,
    /// Expecting the event value.
    EventValue,
    /// Inside the command array, expecting a command map.
    CommandAry,
    /// Inside a command map, expecting the command name.
    CommandAryNewCommand,
    /// After a command name, expecting an argument array or count.
    CommandAryCommandName,
    /// Inside an argument array.
    CommandAryCommandArgs,
    /// Inside an indirect argument map, expecting `pos`.
    CommandAryCommandArgDirect,
    /// Expecting an indirect stack position.
    CommandAryCommandArgIndirectStackpos,
    /// Absorbing: the input violated the grammar.
    Invalid,
}

/// Keyed transitions: state, exact key, next state.
static KEY_TRANSITIONS: &[(State, &str, State)] = &[
    (State::Msg, keys::UID, State::Uid),
    (State::Msg, keys::TYPE, State::Type),
    (State::Msg, keys::COMMANDS, State::Commands),
    (State::Msg, keys::FLAGS, State::Flags),
    (State::Msg, keys::EVENT_NAME, State::EventName),
    (State::Msg, keys::EVENT_VALUE, State::EventValue),
    (State::FlagsMap, keys::FLAG_EXEC, State::FlagsExec),
    (State::FlagsMap, keys::FLAG_REGISTER, State::FlagsRegister),
    (State::CommandAryCommandArgDirect, keys::POS, State::CommandAryCommandArgIndirectStackpos),
];

/// Looks up the state reached by reading `key` in `current`.
///
/// Keys match exactly; anything not listed leads to [`State::Invalid`].
#[must_use]
pub fn next_state_for_key(current: State, key: &str) -> State {
    KEY_TRANSITIONS
        .iter()
        .find(|(state, expected, _)| *state == current && *expected == key)
        .map_or(State::Invalid, |(_, _, next)| *next)
}
