//! Polymorphic object base for the Tessera compositor control plane.
//!
//! Objects pair a payload with a type descriptor, a settings word, a manual
//! reference count, and a reader/writer lock. Polymorphism is expressed as a
//! closed set of capability traits rather than a table of callbacks:
//!
//! - [`Initializable`] for init/deinit hooks,
//! - [`Hashable`], [`Comparable`], [`Runnable`], and [`Loggable`] for the
//!   remaining behaviours.
//!
//! Type identity is a static chain of [`TypeDescriptor`]s terminating at
//! [`OBJECT_TYPE`].
//!
//! # Example
//!
//! ```
//! use tessera_object::{OBJECT_TYPE, RawObject, Unref};
//!
//! let object = RawObject::allocate(256)?;
//! let held = object.getref()?;
//! assert!(object.is_instance_of(&OBJECT_TYPE));
//! assert_eq!(held.unref()?, Unref::Released);
//! assert!(object.is_released());
//! # Ok::<(), tessera_object::ObjectError>(())
//! ```

mod capability;
mod descriptor;
mod error;
mod object;
mod raw;
mod settings;

pub use capability::{Comparable, Hashable, Initializable, Loggable, ObjectType, Runnable};
pub use descriptor::{Ancestors, MAX_TYPE_DEPTH, OBJECT_TYPE, TypeDescriptor};
pub use error::{ErrorKind, ObjectError};
pub use object::{Object, ObjectId, Unref};
pub use raw::{BASE_LAYOUT_SIZE, RawObject};
pub use settings::ObjectSettings;

#[cfg(test)]
mod tests;
