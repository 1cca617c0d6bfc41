//! Errors reported by the message deserializer.

use tessera_object::ErrorKind;
use thiserror::Error;

use crate::deserializer::state::State;
use crate::deserializer::token::TokenKind;

/// Why a document did not produce a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeserializeError {
    /// Storage could not be reserved. Fatal for the session.
    #[error("out of memory while storing {what}")]
    OutOfMemory {
        /// Structure that failed to grow.
        what: &'static str,
    },

    /// The token stream violated the message grammar.
    #[error("unexpected {token} in state {state}: {reason}")]
    Protocol {
        /// State the token was read in.
        state: State,
        /// Offending token.
        token: TokenKind,
        /// Short description of the violation.
        reason: &'static str,
    },

    /// The document held neither a transaction nor an event.
    #[error("document carried no transaction or event")]
    EmptyMessage,

    /// An event lacked its name or value.
    #[error("event is missing its {missing}")]
    IncompleteEvent {
        /// Key that never arrived.
        missing: &'static str,
    },

    /// The document has not been completed yet.
    #[error("no complete message is available")]
    NotReady,

    /// The finished message was already handed out.
    #[error("the message was already taken")]
    AlreadyTaken,
}

impl DeserializeError {
    /// Maps the error onto its broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Self::NotReady | Self::AlreadyTaken => ErrorKind::InvalidArgument,
            Self::Protocol { .. } | Self::EmptyMessage | Self::IncompleteEvent { .. } => {
                ErrorKind::ProtocolError
            }
        }
    }

    /// Negative errno-style code used in error replies.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self.kind() {
            ErrorKind::OutOfMemory => -12,
            ErrorKind::InvalidArgument => -22,
            ErrorKind::ProtocolError => -71,
            ErrorKind::LockFailure => -11,
        }
    }
}
