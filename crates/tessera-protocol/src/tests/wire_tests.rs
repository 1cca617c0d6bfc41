//! Canonical serialisation tests.

use rstest::rstest;
use tessera_values::Value;

use super::support::{FLAGGED_TRANSACTION, INDIRECT_ARGUMENT, MIXED_COMMANDS, MOVE_TRANSACTION};
use crate::{Message, MessageId, Reply, ReplyError, decode_str, to_json};

#[rstest]
#[case(MOVE_TRANSACTION)]
#[case(INDIRECT_ARGUMENT)]
#[case(FLAGGED_TRANSACTION)]
#[case(r#"{"uid":9,"type":"transaction","commands":[{"pop":2},{"push":["x",null,true]}]}"#)]
fn canonical_documents_reserialise_verbatim(#[case] document: &str) {
    let message = decode_str(document).expect("decode");
    assert_eq!(to_json(&message).expect("serialise"), document);
}

#[test]
fn events_serialise_with_type_and_id() {
    let message = decode_str(r#"{"event_value":"on","event_name":"power","uid":6}"#).expect("decode");
    assert_eq!(
        to_json(&message).expect("serialise"),
        r#"{"uid":6,"type":"event","event_name":"power","event_value":"on"}"#
    );
}

#[test]
fn empty_command_maps_are_dropped() {
    let message = decode_str(MIXED_COMMANDS).expect("decode");
    let json = to_json(&message).expect("serialise");
    assert!(!json.contains("{}"));
    assert_eq!(decode_str(&json).expect("decode again"), message);
}

#[test]
fn replies_carry_value_or_error() {
    let ok = Message::from(Reply::value(MessageId::new(4), Value::from("done")));
    assert_eq!(
        to_json(&ok).expect("serialise"),
        r#"{"uid":4,"type":"reply","value":"done"}"#
    );

    let failed = Message::from(Reply::error(MessageId::new(4), ReplyError::new(-22, "bad")));
    assert_eq!(
        to_json(&failed).expect("serialise"),
        r#"{"uid":4,"type":"reply","error":{"code":-22,"description":"bad"}}"#
    );
}

#[test]
fn unset_reply_values_fail_to_serialise() {
    let broken = Message::from(Reply::value(MessageId::new(1), Value::Unset));
    assert!(to_json(&broken).is_err());
}
