//! Error types for the message and statement model.

use tessera_object::ErrorKind;
use tessera_values::ValueError;
use thiserror::Error;

/// Errors raised while building messages and statements.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// Storage could not be reserved.
    #[error("out of memory while growing {what}")]
    OutOfMemory {
        /// Structure that failed to grow.
        what: &'static str,
    },

    /// A direct argument or event context was the unset placeholder.
    #[error("{what} must hold a value")]
    UnsetValue {
        /// Slot that received the placeholder.
        what: &'static str,
    },

    /// Explicit arguments were appended to a statement using the implicit
    /// argument count.
    #[error("command '{name}' already declares an implicit argument count")]
    ImplicitArguments {
        /// Command name.
        name: String,
    },

    /// An implicit count was declared for a statement with listed arguments.
    #[error("command '{name}' already lists explicit arguments")]
    ListedArguments {
        /// Command name.
        name: String,
    },

    /// A value operation failed.
    #[error(transparent)]
    Value(#[from] ValueError),
}

impl ModelError {
    /// Maps the error onto its broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Self::UnsetValue { .. } | Self::ImplicitArguments { .. } | Self::ListedArguments { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::Value(error) => error.kind(),
        }
    }

    pub(crate) const fn out_of_memory(what: &'static str) -> Self {
        Self::OutOfMemory { what }
    }
}
