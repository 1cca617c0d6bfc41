//! Error types for object lifecycle operations.

use thiserror::Error;

/// Broad failure classes shared across the control plane crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The target was missing, released, or the request was malformed.
    InvalidArgument,
    /// Storage could not be reserved.
    OutOfMemory,
    /// Input did not follow the protocol grammar.
    ProtocolError,
    /// A reader/writer lock could not be acquired.
    LockFailure,
}

/// Errors from [`crate::Object`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ObjectError {
    /// Requested allocation is smaller than the base object header.
    #[error("allocation of {requested} bytes is smaller than the {minimum}-byte object header")]
    UndersizedAllocation {
        /// Bytes requested by the caller.
        requested: usize,
        /// Size of the base header.
        minimum: usize,
    },

    /// The object was already released.
    #[error("object {identity} has been released")]
    Released {
        /// Identity of the released object.
        identity: u64,
    },

    /// `unref` was called on an object whose reference count is zero.
    #[error("object {identity} holds no references")]
    NotReferenced {
        /// Identity of the object.
        identity: u64,
    },

    /// The payload's init hook reported failure.
    #[error("initialisation of {type_name} failed")]
    InitFailed {
        /// Name of the payload type.
        type_name: &'static str,
    },

    /// The lock was poisoned by a panicking holder.
    #[error("lock poisoned during {operation}")]
    LockPoisoned {
        /// Operation that observed the poisoned lock.
        operation: &'static str,
    },

    /// A non-blocking lock attempt found the lock held.
    #[error("lock busy during {operation}")]
    WouldBlock {
        /// Operation that attempted the lock.
        operation: &'static str,
    },

    /// Storage for the object body could not be reserved.
    #[error("out of memory reserving {bytes} bytes")]
    OutOfMemory {
        /// Bytes that could not be reserved.
        bytes: usize,
    },
}

impl ObjectError {
    /// Maps the error onto its broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UndersizedAllocation { .. }
            | Self::Released { .. }
            | Self::NotReferenced { .. }
            | Self::InitFailed { .. } => ErrorKind::InvalidArgument,
            Self::LockPoisoned { .. } | Self::WouldBlock { .. } => ErrorKind::LockFailure,
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
        }
    }

    pub(crate) const fn poisoned(operation: &'static str) -> Self {
        Self::LockPoisoned { operation }
    }

    pub(crate) const fn would_block(operation: &'static str) -> Self {
        Self::WouldBlock { operation }
    }
}
