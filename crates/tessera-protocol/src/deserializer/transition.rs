//! The pure state transition function.
//!
//! [`transition`] maps a state and a token to the next state plus an
//! [`Effect`] describing what the deserializer must record. It touches no
//! mutable data, so the grammar can be tested in isolation.

use tessera_values::{Value, ValueError};

use crate::deserializer::state::{State, next_state_for_key};
use crate::deserializer::token::Token;
use crate::keys;
use crate::statement::StackPosition;

/// A scalar token payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar<'a> {
    /// `null`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Borrowed string.
    String(&'a str),
}

impl Scalar<'_> {
    /// Converts into an owned value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfMemory`] when a string cannot be copied.
    pub fn to_value(self) -> Result<Value, ValueError> {
        match self {
            Self::Null => Ok(Value::Nil),
            Self::Bool(value) => Ok(Value::Bool(value)),
            Self::Int(value) => Ok(Value::Int(value)),
            Self::String(text) => Value::string_from(text),
        }
    }
}

/// Data change requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect<'a> {
    /// Nothing to record.
    None,
    /// Set the message identifier, caching it if no transaction exists yet.
    AssignId(u64),
    /// Create the pending transaction if it does not exist yet.
    BeginTransaction,
    /// Mark the message as an event.
    MarkEvent,
    /// Start a statement with the given name.
    BeginStatement(&'a str),
    /// Append a literal argument.
    AppendDirect(Scalar<'a>),
    /// Append a stack reference.
    AppendIndirect(StackPosition),
    /// Declare an implicit argument count.
    ImplicitArguments(u64),
    /// Move the pending statement into the transaction.
    FinishStatement,
    /// Set or clear the execute flag.
    SetExec(bool),
    /// Record the registration name.
    Register(&'a str),
    /// Record the event name.
    EventName(&'a str),
    /// Record the event value.
    EventValue(Scalar<'a>),
}

/// Result of [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<'a> {
    /// State after the token.
    pub next: State,
    /// Data change to apply.
    pub effect: Effect<'a>,
}

impl<'a> Transition<'a> {
    const fn to(next: State) -> Self {
        Self {
            next,
            effect: Effect::None,
        }
    }

    const fn with(next: State, effect: Effect<'a>) -> Self {
        Self { next, effect }
    }

    const fn invalid() -> Self {
        Self::to(State::Invalid)
    }
}

const fn scalar(token: Token<'_>) -> Option<Scalar<'_>> {
    match token {
        Token::Null => Some(Scalar::Null),
        Token::Bool(value) => Some(Scalar::Bool(value)),
        Token::Int(value) => Some(Scalar::Int(value)),
        Token::String(text) => Some(Scalar::String(text)),
        _ => None,
    }
}

fn non_negative(value: i64) -> Option<u64> {
    u64::try_from(value).ok()
}

/// Computes the next state and effect for `token` read in `state`.
///
/// Every pair not covered by the grammar, and every token read in
/// [`State::Invalid`], leads to [`State::Invalid`] with no effect.
#[must_use]
pub fn transition(state: State, token: Token<'_>) -> Transition<'_> {
    use State as S;

    match (state, token) {
        (S::Invalid, _) => Transition::invalid(),

        (S::Init, Token::StartMap) => Transition::to(S::Msg),
        (S::Msg, Token::MapKey(key)) => Transition::to(next_state_for_key(S::Msg, key)),
        (S::Msg, Token::EndMap) => Transition::to(S::Init),

        (S::Uid, Token::Int(raw)) => non_negative(raw).map_or_else(Transition::invalid, |id| {
            Transition::with(S::Msg, Effect::AssignId(id))
        }),

        (S::Type, Token::String(keys::TYPE_TRANSACTION)) => {
            Transition::with(S::Msg, Effect::BeginTransaction)
        }
        (S::Type, Token::String(keys::TYPE_EVENT)) => Transition::with(S::Msg, Effect::MarkEvent),

        (S::Commands, Token::StartArray) => {
            Transition::with(S::CommandAry, Effect::BeginTransaction)
        }
        (S::CommandAry, Token::StartMap) => Transition::to(S::CommandAryNewCommand),
        (S::CommandAry, Token::EndArray) => Transition::to(S::Msg),
        (S::CommandAryNewCommand, Token::MapKey(name)) => {
            Transition::with(S::CommandAryCommandName, Effect::BeginStatement(name))
        }
        (S::CommandAryNewCommand, Token::EndMap) => {
            Transition::with(S::CommandAry, Effect::FinishStatement)
        }
        (S::CommandAryCommandName, Token::Int(raw)) => {
            non_negative(raw).map_or_else(Transition::invalid, |count| {
                Transition::with(S::CommandAryNewCommand, Effect::ImplicitArguments(count))
            })
        }
        (S::CommandAryCommandName, Token::StartArray) => Transition::to(S::CommandAryCommandArgs),
        (S::CommandAryCommandArgs, Token::StartMap) => {
            Transition::to(S::CommandAryCommandArgDirect)
        }
        (S::CommandAryCommandArgs, Token::EndArray) => Transition::to(S::CommandAryNewCommand),
        (S::CommandAryCommandArgs, other) => scalar(other).map_or_else(Transition::invalid, |value| {
            Transition::with(S::CommandAryCommandArgs, Effect::AppendDirect(value))
        }),
        (S::CommandAryCommandArgDirect, Token::MapKey(key)) => {
            Transition::to(next_state_for_key(S::CommandAryCommandArgDirect, key))
        }
        (S::CommandAryCommandArgIndirectStackpos, Token::Int(raw)) => {
            non_negative(raw).map_or_else(Transition::invalid, |position| {
                Transition::with(
                    S::CommandAryCommandArgIndirectStackpos,
                    Effect::AppendIndirect(StackPosition::new(position)),
                )
            })
        }
        (S::CommandAryCommandArgIndirectStackpos, Token::EndMap) => {
            Transition::to(S::CommandAryCommandArgs)
        }

        (S::Flags, Token::StartMap) => Transition::to(S::FlagsMap),
        (S::FlagsMap, Token::MapKey(key)) => Transition::to(next_state_for_key(S::FlagsMap, key)),
        (S::FlagsMap, Token::EndMap) => Transition::to(S::Msg),
        (S::FlagsExec, Token::Bool(enabled)) => {
            Transition::with(S::FlagsMap, Effect::SetExec(enabled))
        }
        (S::FlagsRegister, Token::String(name)) => {
            Transition::with(S::FlagsMap, Effect::Register(name))
        }

        (S::EventName, Token::String(name)) => Transition::with(S::Msg, Effect::EventName(name)),
        (S::EventValue, other) => scalar(other).map_or_else(Transition::invalid, |value| {
            Transition::with(S::Msg, Effect::EventValue(value))
        }),

        _ => Transition::invalid(),
    }
}
