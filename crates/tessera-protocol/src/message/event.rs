//! Events: a named notification carrying one context value.

use tessera_values::Value;

use crate::error::ModelError;
use crate::message::MessageId;

/// Named notification carrying one context value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    id: MessageId,
    name: String,
    context: Value,
}

impl Event {
    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsetValue`] when `context` is the unset
    /// placeholder.
    pub fn new(id: MessageId, name: String, context: Value) -> Result<Self, ModelError> {
        if !context.is_valid() {
            return Err(ModelError::UnsetValue {
                what: "event context",
            });
        }
        Ok(Self { id, name, context })
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

    /// Event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Context value.
    #[must_use]
    pub const fn context(&self) -> &Value {
        &self.context
    }
}
