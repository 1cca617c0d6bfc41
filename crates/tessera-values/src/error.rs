//! Error types for value operations.

use tessera_object::ErrorKind;
use thiserror::Error;

use crate::ValueType;

/// Errors from [`crate::Value`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValueError {
    /// The value is still the unset placeholder.
    #[error("cannot {operation} an unset value")]
    Uninitialized {
        /// Operation that was refused.
        operation: &'static str,
    },

    /// A typed accessor was used on a value of another type.
    #[error("expected a {expected} value, found {found}")]
    TypeMismatch {
        /// Type the accessor works on.
        expected: ValueType,
        /// Type actually stored.
        found: ValueType,
    },

    /// Storage for the payload could not be reserved.
    #[error("out of memory reserving {bytes} bytes for a value")]
    OutOfMemory {
        /// Bytes that could not be reserved.
        bytes: usize,
    },
}

impl ValueError {
    /// Maps the error onto its broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Uninitialized { .. } | Self::TypeMismatch { .. } => ErrorKind::InvalidArgument,
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
        }
    }

    pub(crate) const fn uninitialized(operation: &'static str) -> Self {
        Self::Uninitialized { operation }
    }

    pub(crate) const fn mismatch(expected: ValueType, found: ValueType) -> Self {
        Self::TypeMismatch { expected, found }
    }
}
