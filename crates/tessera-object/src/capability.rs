//! Capability traits attached to object payloads.
//!
//! A payload exposes each capability it supports through the matching `as_*`
//! accessor on [`ObjectType`]. Absent capabilities fall back to the neutral
//! behaviour documented on [`crate::Object`].

use std::any::Any;
use std::cmp::Ordering;

use crate::descriptor::TypeDescriptor;

/// Payload stored inside an [`crate::Object`].
pub trait ObjectType: Any + Send + Sync {
    /// Descriptor for the payload's current type.
    ///
    /// Payloads whose type can change in place (for example a value switching
    /// variant) report the descriptor of their current shape.
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Lifecycle hooks, if the payload has any.
    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        None
    }

    /// Hashing capability.
    fn as_hashable(&self) -> Option<&dyn Hashable> {
        None
    }

    /// Ordering capability.
    fn as_comparable(&self) -> Option<&dyn Comparable> {
        None
    }

    /// Execution capability.
    fn as_runnable(&self) -> Option<&dyn Runnable> {
        None
    }

    /// Diagnostic description capability.
    fn as_loggable(&self) -> Option<&dyn Loggable> {
        None
    }
}

/// Initialisation and teardown hooks.
pub trait Initializable {
    /// Resets the payload to its initial state. Returns false on failure.
    fn init(&mut self) -> bool;

    /// Releases payload resources before the object is dropped.
    fn deinit(&mut self) -> bool {
        true
    }
}

/// Stable hashing of a payload.
pub trait Hashable {
    /// Hash of the payload's current contents.
    fn hash_value(&self) -> u64;
}

/// Ordering between payloads.
pub trait Comparable {
    /// Compares against another payload; `None` when the types are unrelated.
    fn compare(&self, other: &dyn Any) -> Option<Ordering>;
}

/// Polymorphic run hook.
pub trait Runnable {
    /// Executes the payload's action, reporting success.
    fn run(&self) -> bool;
}

/// Human-readable description for structured logs.
pub trait Loggable {
    /// Short single-line summary of the payload.
    fn describe(&self) -> String;
}
