//! Grammar table tests for the pure transition function.

use rstest::rstest;

use crate::deserializer::{Effect, Scalar, State, Token, Transition, next_state_for_key, transition};
use crate::statement::StackPosition;

#[rstest]
#[case(State::Msg, "uid", State::Uid)]
#[case(State::Msg, "type", State::Type)]
#[case(State::Msg, "commands", State::Commands)]
#[case(State::Msg, "flags", State::Flags)]
#[case(State::Msg, "event_name", State::EventName)]
#[case(State::Msg, "event_value", State::EventValue)]
#[case(State::FlagsMap, "exec", State::FlagsExec)]
#[case(State::FlagsMap, "register", State::FlagsRegister)]
#[case(State::CommandAryCommandArgDirect, "pos", State::CommandAryCommandArgIndirectStackpos)]
fn known_keys_resolve(#[case] state: State, #[case] key: &str, #[case] expected: State) {
    assert_eq!(next_state_for_key(state, key), expected);
}

#[rstest]
#[case(State::Msg, "exec")]
#[case(State::Msg, "uidx")]
#[case(State::Msg, "ui")]
#[case(State::FlagsMap, "uid")]
#[case(State::CommandAryCommandArgDirect, "type")]
#[case(State::Init, "uid")]
fn unknown_keys_invalidate(#[case] state: State, #[case] key: &str) {
    assert_eq!(next_state_for_key(state, key), State::Invalid);
}

#[rstest]
#[case(State::Uid, Token::Int(9), State::Msg, Effect::AssignId(9))]
#[case(State::Type, Token::String("transaction"), State::Msg, Effect::BeginTransaction)]
#[case(State::Type, Token::String("event"), State::Msg, Effect::MarkEvent)]
#[case(State::Commands, Token::StartArray, State::CommandAry, Effect::BeginTransaction)]
#[case(State::CommandAryNewCommand, Token::MapKey("move"), State::CommandAryCommandName, Effect::BeginStatement("move"))]
#[case(State::CommandAryNewCommand, Token::EndMap, State::CommandAry, Effect::FinishStatement)]
#[case(State::CommandAryCommandName, Token::Int(3), State::CommandAryNewCommand, Effect::ImplicitArguments(3))]
#[case(State::CommandAryCommandArgs, Token::Null, State::CommandAryCommandArgs, Effect::AppendDirect(Scalar::Null))]
#[case(State::CommandAryCommandArgs, Token::String("a"), State::CommandAryCommandArgs, Effect::AppendDirect(Scalar::String("a")))]
#[case(
    State::CommandAryCommandArgIndirectStackpos,
    Token::Int(0),
    State::CommandAryCommandArgIndirectStackpos,
    Effect::AppendIndirect(StackPosition::new(0))
)]
#[case(State::FlagsExec, Token::Bool(false), State::FlagsMap, Effect::SetExec(false))]
#[case(State::FlagsRegister, Token::String("foo"), State::FlagsMap, Effect::Register("foo"))]
#[case(State::EventName, Token::String("tick"), State::Msg, Effect::EventName("tick"))]
#[case(State::EventValue, Token::Bool(true), State::Msg, Effect::EventValue(Scalar::Bool(true)))]
fn grammar_effects(
    #[case] state: State,
    #[case] token: Token<'static>,
    #[case] next: State,
    #[case] effect: Effect<'static>,
) {
    assert_eq!(transition(state, token), Transition { next, effect });
}

#[rstest]
#[case(State::Init, Token::MapKey("uid"), State::Invalid)]
#[case(State::Init, Token::StartMap, State::Msg)]
#[case(State::Msg, Token::EndMap, State::Init)]
#[case(State::CommandAry, Token::StartMap, State::CommandAryNewCommand)]
#[case(State::CommandAry, Token::EndArray, State::Msg)]
#[case(State::CommandAryCommandName, Token::StartArray, State::CommandAryCommandArgs)]
#[case(State::CommandAryCommandArgs, Token::StartMap, State::CommandAryCommandArgDirect)]
#[case(State::CommandAryCommandArgs, Token::EndArray, State::CommandAryNewCommand)]
#[case(State::CommandAryCommandArgIndirectStackpos, Token::EndMap, State::CommandAryCommandArgs)]
#[case(State::Flags, Token::StartMap, State::FlagsMap)]
#[case(State::FlagsMap, Token::EndMap, State::Msg)]
fn structural_moves(#[case] state: State, #[case] token: Token<'static>, #[case] next: State) {
    assert_eq!(transition(state, token), Transition { next, effect: Effect::None });
}

#[rstest]
#[case(State::Uid, Token::Int(-1))]
#[case(State::Uid, Token::String("1"))]
#[case(State::Type, Token::String("reply"))]
#[case(State::Type, Token::String("Transaction"))]
#[case(State::CommandAryCommandName, Token::Int(-2))]
#[case(State::CommandAryCommandName, Token::String("x"))]
#[case(State::CommandAryCommandArgs, Token::StartArray)]
#[case(State::CommandAryCommandArgs, Token::EndMap)]
#[case(State::CommandAryCommandArgIndirectStackpos, Token::Int(-5))]
#[case(State::FlagsExec, Token::Int(1))]
#[case(State::FlagsRegister, Token::Null)]
#[case(State::EventName, Token::Int(1))]
#[case(State::EventValue, Token::StartMap)]
#[case(State::Commands, Token::StartMap)]
fn violations_invalidate(#[case] state: State, #[case] token: Token<'static>) {
    assert_eq!(transition(state, token).next, State::Invalid);
}

#[rstest]
#[case(Token::StartMap)]
#[case(Token::EndMap)]
#[case(Token::MapKey("uid"))]
#[case(Token::Int(1))]
fn invalid_absorbs_everything(#[case] token: Token<'static>) {
    assert_eq!(
        transition(State::Invalid, token),
        Transition {
            next: State::Invalid,
            effect: Effect::None
        }
    );
}

#[test]
fn states_render_in_screaming_case() {
    assert_eq!(
        State::CommandAryCommandArgIndirectStackpos.to_string(),
        "COMMAND_ARY_COMMAND_ARG_INDIRECT_STACKPOS"
    );
    assert_eq!(State::default(), State::Init);
}
