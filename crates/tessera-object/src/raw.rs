//! Untyped objects sized by byte count.

use std::mem::size_of;
use std::sync::atomic::AtomicBool;

use crate::capability::ObjectType;
use crate::descriptor::{OBJECT_TYPE, TypeDescriptor};
use crate::error::ObjectError;
use crate::object::{Object, ObjectId};
use crate::settings::ObjectSettings;

/// Bytes occupied by the fields every object carries.
pub const BASE_LAYOUT_SIZE: usize =
    size_of::<ObjectId>() + size_of::<ObjectSettings>() + size_of::<usize>() + size_of::<AtomicBool>();

/// Root-typed payload owning a zeroed tail of bytes.
///
/// Subsystems that manage their own layout allocate through
/// [`RawObject::allocate`] and interpret the tail themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    tail: Box<[u8]>,
}

impl RawObject {
    /// Allocates a root-typed object of `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::UndersizedAllocation`] when `size` is smaller
    /// than [`BASE_LAYOUT_SIZE`] and [`ObjectError::OutOfMemory`] when the tail
    /// cannot be reserved.
    pub fn allocate(size: usize) -> Result<Object<Self>, ObjectError> {
        let Some(tail_len) = size.checked_sub(BASE_LAYOUT_SIZE) else {
            return Err(ObjectError::UndersizedAllocation {
                requested: size,
                minimum: BASE_LAYOUT_SIZE,
            });
        };
        let mut tail = Vec::new();
        tail.try_reserve_exact(tail_len)
            .map_err(|_| ObjectError::OutOfMemory { bytes: tail_len })?;
        tail.resize(tail_len, 0);
        Ok(Object::new(Self {
            tail: tail.into_boxed_slice(),
        }))
    }

    /// The zeroed bytes following the base layout.
    #[must_use]
    pub fn tail(&self) -> &[u8] {
        &self.tail
    }

    /// Mutable access to the tail bytes.
    pub fn tail_mut(&mut self) -> &mut [u8] {
        &mut self.tail
    }
}

impl ObjectType for RawObject {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &OBJECT_TYPE
    }
}
