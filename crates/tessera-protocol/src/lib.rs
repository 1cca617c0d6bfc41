//! Control message model and streaming JSON deserializer.
//!
//! Clients drive the compositor with JSON documents describing either a
//! transaction (an ordered batch of commands with flags) or an event (a name
//! and a context value). [`MessageDeserializer`] consumes the tokens of one
//! document and builds a [`Message`]; [`decode`] wires it to `serde_json`.
//!
//! # Example
//!
//! ```
//! use tessera_protocol::{Argument, Message, TransactionFlags, decode_str};
//! use tessera_values::Value;
//!
//! let message = decode_str(
//!     r#"{"uid":7,"type":"transaction","commands":[{"move":[1,{"pos":0}]}],"flags":{"exec":true}}"#,
//! )?;
//! let Message::Transaction(transaction) = message else {
//!     panic!("expected a transaction");
//! };
//! assert_eq!(transaction.id().get(), 7);
//! assert!(transaction.flags().contains(TransactionFlags::EXEC));
//! let statement = &transaction.statements()[0];
//! assert_eq!(statement.name(), "move");
//! assert_eq!(statement.listed()[0], Argument::Direct(Value::Int(1)));
//! # Ok::<(), tessera_protocol::DecodeError>(())
//! ```

pub mod deserializer;
mod error;
mod json;
pub mod keys;
mod message;
mod statement;
mod wire;

pub use deserializer::{DeserializeError, Flow, MessageDeserializer, State, Token, TokenKind};
pub use error::ModelError;
pub use json::{DecodeError, decode, decode_str};
pub use message::{
    EVENT_TYPE, Event, MESSAGE_TYPE, Message, MessageId, MessageKind, REPLY_TYPE, Reply,
    ReplyError, TRANSACTION_TYPE, Transaction, TransactionFlags,
};
pub use statement::{Argument, Arguments, StackPosition, Statement};
pub use wire::to_json;

#[cfg(test)]
mod tests;
