//! Decoded control messages.
//!
//! A [`Message`] is one of three shapes sharing a [`MessageId`]:
//! transactions carrying statements, events carrying a named context value,
//! and replies produced by the executor.

mod event;
mod reply;
mod transaction;

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use strum::Display;
use tessera_object::{Comparable, Hashable, Loggable, OBJECT_TYPE, ObjectType, TypeDescriptor};

pub use event::Event;
pub use reply::{Reply, ReplyError};
pub use transaction::{Transaction, TransactionFlags};

/// Supertype of every message.
pub static MESSAGE_TYPE: TypeDescriptor = TypeDescriptor::derived("message", &OBJECT_TYPE);
/// Transactions.
pub static TRANSACTION_TYPE: TypeDescriptor =
    TypeDescriptor::derived("message_transaction", &MESSAGE_TYPE);
/// Events.
pub static EVENT_TYPE: TypeDescriptor = TypeDescriptor::derived("message_event", &MESSAGE_TYPE);
/// Replies.
pub static REPLY_TYPE: TypeDescriptor = TypeDescriptor::derived("message_reply", &MESSAGE_TYPE);

/// Correlation identifier chosen by the sender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminant of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    /// See [`Transaction`].
    Transaction,
    /// See [`Event`].
    Event,
    /// See [`Reply`].
    Reply,
}

/// A control message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Batch of statements to execute.
    Transaction(Transaction),
    /// Named notification with a context value.
    Event(Event),
    /// Result of executing a transaction.
    Reply(Reply),
}

impl Message {
    /// Correlation identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        match self {
            Self::Transaction(transaction) => transaction.id(),
            Self::Event(event) => event.id(),
            Self::Reply(reply) => reply.id(),
        }
    }

    /// Replaces the correlation identifier.
    pub const fn set_id(&mut self, id: MessageId) {
        match self {
            Self::Transaction(transaction) => transaction.set_id(id),
            Self::Event(event) => event.set_id(id),
            Self::Reply(reply) => reply.set_id(id),
        }
    }

    /// Message shape.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Transaction(_) => MessageKind::Transaction,
            Self::Event(_) => MessageKind::Event,
            Self::Reply(_) => MessageKind::Reply,
        }
    }

    /// The transaction, if this is one.
    #[must_use]
    pub const fn as_transaction(&self) -> Option<&Transaction> {
        match self {
            Self::Transaction(transaction) => Some(transaction),
            _ => None,
        }
    }

    /// The event, if this is one.
    #[must_use]
    pub const fn as_event(&self) -> Option<&Event> {
        match self {
            Self::Event(event) => Some(event),
            _ => None,
        }
    }

    /// The reply, if this is one.
    #[must_use]
    pub const fn as_reply(&self) -> Option<&Reply> {
        match self {
            Self::Reply(reply) => Some(reply),
            _ => None,
        }
    }
}

impl From<Transaction> for Message {
    fn from(value: Transaction) -> Self {
        Self::Transaction(value)
    }
}

impl From<Event> for Message {
    fn from(value: Event) -> Self {
        Self::Event(value)
    }
}

impl From<Reply> for Message {
    fn from(value: Reply) -> Self {
        Self::Reply(value)
    }
}

impl ObjectType for Message {
    fn descriptor(&self) -> &'static TypeDescriptor {
        match self {
            Self::Transaction(_) => &TRANSACTION_TYPE,
            Self::Event(_) => &EVENT_TYPE,
            Self::Reply(_) => &REPLY_TYPE,
        }
    }

    fn as_hashable(&self) -> Option<&dyn Hashable> {
        Some(self)
    }

    fn as_comparable(&self) -> Option<&dyn Comparable> {
        Some(self)
    }

    fn as_loggable(&self) -> Option<&dyn Loggable> {
        Some(self)
    }
}

impl Hashable for Message {
    fn hash_value(&self) -> u64 {
        self.id().get()
    }
}

/// Messages order by identifier only.
impl Comparable for Message {
    fn compare(&self, other: &dyn Any) -> Option<Ordering> {
        other
            .downcast_ref::<Self>()
            .map(|theirs| self.id().cmp(&theirs.id()))
    }
}

impl Loggable for Message {
    fn describe(&self) -> String {
        match self {
            Self::Transaction(transaction) => format!(
                "transaction {} with {} statement(s), flags {}",
                transaction.id(),
                transaction.statements().len(),
                transaction.flags()
            ),
            Self::Event(event) => format!("event {} '{}'", event.id(), event.name()),
            Self::Reply(reply) => match reply.outcome() {
                Ok(_) => format!("reply {}", reply.id()),
                Err(error) => format!("error reply {} ({})", reply.id(), error.code()),
            },
        }
    }
}
