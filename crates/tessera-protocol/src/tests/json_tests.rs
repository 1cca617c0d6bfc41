//! End-to-end decoding through the `serde_json` tokenizer.

use rstest::rstest;
use tessera_object::ErrorKind;
use tessera_values::Value;

use super::support::{
    EVENT, EVENT_REORDERED, FLAGGED_TRANSACTION, INDIRECT_ARGUMENT, MISPLACED_KEY, MIXED_COMMANDS,
    MOVE_TRANSACTION, MOVE_TRANSACTION_SWAPPED,
};
use crate::deserializer::{DeserializeError, State};
use crate::{Argument, DecodeError, Message, StackPosition, TransactionFlags, decode, decode_str};

#[test]
fn decodes_a_move_transaction() {
    let message = decode_str(MOVE_TRANSACTION).expect("decode");
    let transaction = message.as_transaction().expect("transaction");
    assert_eq!(transaction.id().get(), 1);
    assert_eq!(transaction.statements().len(), 1);
    assert_eq!(transaction.statements()[0].name(), "move");
    assert_eq!(
        transaction.statements()[0].listed(),
        [Argument::Direct(Value::Int(1)), Argument::Direct(Value::Int(2))]
    );
    assert_eq!(transaction.flags(), TransactionFlags::NONE);
}

#[test]
fn key_order_does_not_change_the_result() {
    let first = decode_str(MOVE_TRANSACTION).expect("decode");
    let second = decode_str(MOVE_TRANSACTION_SWAPPED).expect("decode");
    assert_eq!(first, second);
}

#[test]
fn pos_maps_become_indirect_arguments() {
    let message = decode_str(INDIRECT_ARGUMENT).expect("decode");
    let statement = &message.as_transaction().expect("transaction").statements()[0];
    assert_eq!(statement.listed(), [Argument::Indirect(StackPosition::new(0))]);
}

#[test]
fn flags_set_exec_and_registration() {
    let message = decode_str(FLAGGED_TRANSACTION).expect("decode");
    let transaction = message.as_transaction().expect("transaction");
    assert!(transaction.flags().contains(TransactionFlags::EXEC));
    assert!(transaction.flags().contains(TransactionFlags::REGISTER));
    assert_eq!(transaction.name(), Some("foo"));
    assert!(transaction.statements().is_empty());
}

#[test]
fn mixed_commands_keep_declaration_order() {
    let message = decode_str(MIXED_COMMANDS).expect("decode");
    let transaction = message.as_transaction().expect("transaction");
    let names: Vec<_> = transaction.statements().iter().map(|s| s.name()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(transaction.statements()[1].implicit_count(), Some(2));
    assert_eq!(
        transaction.statements()[2].listed(),
        [
            Argument::Indirect(StackPosition::new(1)),
            Argument::Direct(Value::from("x")),
            Argument::Direct(Value::Nil),
            Argument::Direct(Value::from(true)),
        ]
    );
}

#[rstest]
#[case(EVENT)]
#[case(EVENT_REORDERED)]
fn events_decode_in_any_key_order(#[case] document: &str) {
    let Message::Event(event) = decode_str(document).expect("decode") else {
        panic!("expected an event");
    };
    assert_eq!(event.name(), "foo");
    assert_eq!(event.context(), &Value::Int(42));
}

#[test]
fn transaction_wins_over_event_fields() {
    let message =
        decode_str(r#"{"type":"transaction","event_name":"foo","event_value":1}"#).expect("decode");
    assert!(message.as_transaction().is_some());
}

#[test]
fn misplaced_key_is_a_protocol_error() {
    let error = decode_str(MISPLACED_KEY).expect_err("must fail");
    assert_eq!(error.kind(), ErrorKind::ProtocolError);
    assert!(matches!(
        error,
        DecodeError::Deserialize(DeserializeError::Protocol {
            state: State::CommandAryCommandArgDirect,
            ..
        })
    ));
}

#[rstest]
#[case::unknown_key(r#"{"bogus":1}"#)]
#[case::unknown_type(r#"{"type":"reply"}"#)]
#[case::negative_uid(r#"{"uid":-1,"type":"transaction"}"#)]
#[case::negative_position(r#"{"commands":[{"m":[{"pos":-1}]}]}"#)]
#[case::negative_count(r#"{"commands":[{"m":-3}]}"#)]
#[case::top_level_array("[1,2]")]
#[case::top_level_scalar("5")]
#[case::nested_argument_array(r#"{"commands":[{"m":[[1]]}]}"#)]
#[case::map_event_value(r#"{"event_name":"x","event_value":{}}"#)]
fn grammar_violations(#[case] document: &str) {
    let error = decode_str(document).expect_err("must fail");
    assert!(
        matches!(error, DecodeError::Deserialize(DeserializeError::Protocol { .. })),
        "unexpected error {error:?}"
    );
}

#[rstest]
#[case::float(r#"{"uid":1.5}"#)]
#[case::overflow(r#"{"uid":18446744073709551615}"#)]
#[case::truncated(r#"{"uid":"#)]
#[case::trailing(r#"{"type":"transaction"} {}"#)]
fn tokenizer_rejections(#[case] document: &str) {
    let error = decode_str(document).expect_err("must fail");
    assert!(matches!(error, DecodeError::Json(_)), "unexpected error {error:?}");
    assert_eq!(error.code(), -71);
}

#[test]
fn empty_document_is_not_a_message() {
    let error = decode(b"{}").expect_err("must fail");
    assert!(matches!(
        error,
        DecodeError::Deserialize(DeserializeError::EmptyMessage)
    ));
}

#[rstest]
#[case(r#"{"type":"event","event_name":"foo"}"#, "event_value")]
#[case(r#"{"type":"event","event_value":1}"#, "event_name")]
fn incomplete_events_name_the_missing_key(#[case] document: &str, #[case] missing: &str) {
    let error = decode_str(document).expect_err("must fail");
    assert!(
        matches!(
            &error,
            DecodeError::Deserialize(DeserializeError::IncompleteEvent { missing: found })
                if *found == missing
        ),
        "unexpected error {error:?}"
    );
}

#[test]
fn whitespace_around_the_document_is_accepted() {
    let padded = format!("  {MOVE_TRANSACTION}\n");
    assert!(decode_str(&padded).is_ok());
}
