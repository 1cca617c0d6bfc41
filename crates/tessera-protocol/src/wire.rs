//! Canonical JSON form of messages.
//!
//! Transactions and events serialise to the shape the deserializer accepts,
//! so `decode(serialize(message))` reproduces the message whenever its
//! values are scalars. Replies use the same envelope with `type: "reply"`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::keys;
use crate::message::{Event, Message, Reply, Transaction, TransactionFlags};
use crate::statement::{Argument, Arguments, Statement};

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Transaction(transaction) => transaction.serialize(serializer),
            Self::Event(event) => event.serialize(serializer),
            Self::Reply(reply) => reply.serialize(serializer),
        }
    }
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let has_flags = self.flags().contains(TransactionFlags::EXEC) || self.name().is_some();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(keys::UID, &self.id().get())?;
        map.serialize_entry(keys::TYPE, keys::TYPE_TRANSACTION)?;
        map.serialize_entry(keys::COMMANDS, self.statements())?;
        if has_flags {
            map.serialize_entry(keys::FLAGS, &FlagsBody(self))?;
        }
        map.end()
    }
}

struct FlagsBody<'a>(&'a Transaction);

impl Serialize for FlagsBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if self.0.flags().contains(TransactionFlags::EXEC) {
            map.serialize_entry(keys::FLAG_EXEC, &true)?;
        }
        if let Some(name) = self.0.name() {
            map.serialize_entry(keys::FLAG_REGISTER, name)?;
        }
        map.end()
    }
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self.arguments() {
            Arguments::Listed(arguments) => map.serialize_entry(self.name(), arguments)?,
            Arguments::Implicit(count) => map.serialize_entry(self.name(), count)?,
        }
        map.end()
    }
}

impl Serialize for Argument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Direct(value) => value.serialize(serializer),
            Self::Indirect(position) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(keys::POS, &position.get())?;
                map.end()
            }
        }
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(keys::UID, &self.id().get())?;
        map.serialize_entry(keys::TYPE, keys::TYPE_EVENT)?;
        map.serialize_entry(keys::EVENT_NAME, self.name())?;
        map.serialize_entry(keys::EVENT_VALUE, self.context())?;
        map.end()
    }
}

impl Serialize for Reply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(keys::UID, &self.id().get())?;
        map.serialize_entry(keys::TYPE, keys::TYPE_REPLY)?;
        match self.outcome() {
            Ok(value) => map.serialize_entry(keys::VALUE, value)?,
            Err(error) => {
                map.serialize_entry(keys::ERROR, &ErrorBody(error.code(), error.description()))?;
            }
        }
        map.end()
    }
}

struct ErrorBody<'a>(i32, &'a str);

impl Serialize for ErrorBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(keys::CODE, &self.0)?;
        map.serialize_entry(keys::DESCRIPTION, self.1)?;
        map.end()
    }
}

/// Serialises a message to its canonical JSON text.
///
/// # Errors
///
/// Fails when a carried value cannot be serialised, such as the unset
/// placeholder.
pub fn to_json(message: &Message) -> Result<String, serde_json::Error> {
    serde_json::to_string(message)
}
