//! Replies to transactions.

use tessera_values::Value;
use thiserror::Error;

use crate::message::MessageId;

/// Failure reported back to the sender of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description} (code {code})")]
pub struct ReplyError {
    code: i32,
    description: String,
}

impl ReplyError {
    /// Creates a reply error.
    #[must_use]
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }

    /// Numeric error code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Result of executing a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    id: MessageId,
    outcome: Result<Value, ReplyError>,
}

impl Reply {
    /// Successful reply carrying `value`.
    #[must_use]
    pub const fn value(id: MessageId, value: Value) -> Self {
        Self {
            id,
            outcome: Ok(value),
        }
    }

    /// Failed reply.
    #[must_use]
    pub const fn error(id: MessageId, error: ReplyError) -> Self {
        Self {
            id,
            outcome: Err(error),
        }
    }

    /// Correlation identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Replaces the correlation identifier.
    pub const fn set_id(&mut self, id: MessageId) {
        self.id = id;
    }

    /// Value or error carried by the reply.
    ///
    /// # Errors
    ///
    /// Returns the [`ReplyError`] of a failed reply.
    pub const fn outcome(&self) -> Result<&Value, &ReplyError> {
        self.outcome.as_ref()
    }
}
