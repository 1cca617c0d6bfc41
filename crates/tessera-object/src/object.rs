//! Reference-counted objects guarded by a per-object reader/writer lock.
//!
//! An [`Object`] handle is a shared pointer to a header holding the object's
//! identity, its settings, a logical reference count, and the payload. The
//! reference count is manual: [`Object::new`] starts at zero, every
//! [`Object::getref`] adds one, and every [`Object::unref`] removes one. The
//! caller whose `unref` moves the count from one to zero tears the payload
//! down; every other handle then observes a released object and behaves like
//! a null target.
//!
//! Readers (getters, [`Object::run`], [`Object::hash`]) take the read lock and
//! mutators (setters, reference counting, teardown) take the write lock. Locks
//! belong to a single object; operations spanning two objects never block on
//! the second lock while holding the first.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};

use tracing::{debug, trace};

use crate::capability::ObjectType;
use crate::descriptor::TypeDescriptor;
use crate::error::ObjectError;
use crate::settings::ObjectSettings;

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity assigned to every object at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        Self(NEXT_IDENTITY.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Wraps a raw identity, for example one received over the wire.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identity.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Result of a successful [`Object::unref`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unref {
    /// Other references remain.
    Retained {
        /// References still held after this call.
        remaining: usize,
    },
    /// This call dropped the last reference and tore the payload down.
    Released,
}

struct Body<T> {
    settings: ObjectSettings,
    refcount: usize,
    payload: Option<T>,
}

struct Header<T> {
    identity: ObjectId,
    released: AtomicBool,
    body: RwLock<Body<T>>,
}

/// Shared handle to a lock-guarded, reference-counted payload.
///
/// Dropping a handle does not touch the reference count; only
/// [`Object::unref`] does.
pub struct Object<T: ObjectType> {
    header: Arc<Header<T>>,
}

impl<T: ObjectType> Object<T> {
    /// Wraps `payload` in a fresh object with no settings and no references.
    #[must_use]
    pub fn new(payload: T) -> Self {
        Self {
            header: Arc::new(Header {
                identity: ObjectId::next(),
                released: AtomicBool::new(false),
                body: RwLock::new(Body {
                    settings: ObjectSettings::NONE,
                    refcount: 0,
                    payload: Some(payload),
                }),
            }),
        }
    }

    /// Returns the identity assigned at construction.
    #[must_use]
    pub fn identity(&self) -> ObjectId {
        self.header.identity
    }

    /// Returns true once the last reference has been dropped.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.header.released.load(AtomicOrdering::Acquire)
    }

    /// Returns true when both handles point at the same object.
    #[must_use]
    pub fn same_object(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.header, &other.header)
    }

    /// Re-initialises the object in place.
    ///
    /// Settings and the reference count are reset, a poisoned lock is
    /// recovered, and the payload's init hook runs if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::Released`] for a released object and
    /// [`ObjectError::InitFailed`] when the init hook reports failure.
    pub fn init(&self) -> Result<(), ObjectError> {
        let mut guard = match self.header.body.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                self.header.body.clear_poison();
                poisoned.into_inner()
            }
        };
        let body = &mut *guard;
        let Some(payload) = body.payload.as_mut() else {
            return Err(self.released_error());
        };
        body.settings = ObjectSettings::NONE;
        body.refcount = 0;

        let type_name = payload.descriptor().name();
        if payload.as_initializable().is_none_or(|hooks| hooks.init()) {
            Ok(())
        } else {
            Err(ObjectError::InitFailed { type_name })
        }
    }

    /// Takes a new reference and returns a handle carrying it.
    ///
    /// # Errors
    ///
    /// Fails if the object was released or its lock is poisoned.
    pub fn getref(&self) -> Result<Self, ObjectError> {
        let mut body = self.write_body("getref")?;
        if body.payload.is_none() {
            return Err(self.released_error());
        }
        body.refcount += 1;
        Ok(Self {
            header: Arc::clone(&self.header),
        })
    }

    /// Drops one reference.
    ///
    /// The decrement happens under the write lock, so exactly one caller sees
    /// the count reach zero. That caller also wins the release guard, runs the
    /// payload's deinit hook, and drops the payload.
    ///
    /// # Errors
    ///
    /// Fails if the object was already released, holds no references, or its
    /// lock is poisoned.
    pub fn unref(self) -> Result<Unref, ObjectError> {
        let mut body = self.write_body("unref")?;
        if body.payload.is_none() {
            return Err(self.released_error());
        }
        let remaining =
            body.refcount
                .checked_sub(1)
                .ok_or_else(|| ObjectError::NotReferenced {
                    identity: self.identity().get(),
                })?;
        body.refcount = remaining;
        if remaining > 0 {
            return Ok(Unref::Retained { remaining });
        }

        if self.header.released.swap(true, AtomicOrdering::AcqRel) {
            return Err(self.released_error());
        }
        if let Some(mut payload) = body.payload.take() {
            let type_name = payload.descriptor().name();
            let clean = payload.as_initializable().is_none_or(|hooks| hooks.deinit());
            trace!(
                target: "tessera::object",
                object = %self.identity(),
                type_name,
                clean,
                "released object"
            );
        }
        Ok(Unref::Released)
    }

    /// Current reference count; zero for a released object.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        self.read_body("ref_count").map_or(0, |body| body.refcount)
    }

    /// Current settings; [`ObjectSettings::NONE`] when unavailable.
    #[must_use]
    pub fn settings(&self) -> ObjectSettings {
        self.read_body("settings")
            .ok()
            .filter(|body| body.payload.is_some())
            .map_or(ObjectSettings::NONE, |body| body.settings)
    }

    /// Replaces the settings.
    ///
    /// # Errors
    ///
    /// Fails if the object was released or its lock is poisoned.
    pub fn set_settings(&self, settings: ObjectSettings) -> Result<(), ObjectError> {
        let mut body = self.write_body("set_settings")?;
        if body.payload.is_none() {
            return Err(self.released_error());
        }
        body.settings = settings;
        Ok(())
    }

    /// Descriptor of the payload's current type, or `None` once released.
    #[must_use]
    pub fn type_descriptor(&self) -> Option<&'static TypeDescriptor> {
        self.read_body("type_descriptor")
            .ok()?
            .payload
            .as_ref()
            .map(ObjectType::descriptor)
    }

    /// Returns true if the payload's type chain contains `descriptor`.
    #[must_use]
    pub fn is_instance_of(&self, descriptor: &'static TypeDescriptor) -> bool {
        self.type_descriptor()
            .is_some_and(|current| current.is_subtype_of(descriptor))
    }

    /// Runs the payload's run hook; false when absent or unavailable.
    #[must_use]
    pub fn run(&self) -> bool {
        self.read_body("run")
            .ok()
            .and_then(|body| {
                body.payload
                    .as_ref()
                    .and_then(ObjectType::as_runnable)
                    .map(|runnable| runnable.run())
            })
            .unwrap_or(false)
    }

    /// Hash reported by the payload's hash hook; zero when absent.
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.read_body("hash")
            .ok()
            .and_then(|body| {
                body.payload
                    .as_ref()
                    .and_then(ObjectType::as_hashable)
                    .map(|hashable| hashable.hash_value())
            })
            .unwrap_or(0)
    }

    /// Compares two objects through the payload's compare hook.
    ///
    /// The second object's lock is only ever tried, never waited on, while
    /// this object's read lock is held. A busy second lock causes both to be
    /// released and the attempt to be retried.
    #[must_use]
    pub fn compare<U: ObjectType>(&self, other: &Object<U>) -> Option<Ordering> {
        if std::ptr::addr_eq(Arc::as_ptr(&self.header), Arc::as_ptr(&other.header)) {
            return Some(Ordering::Equal);
        }
        loop {
            let mine = self.read_body("compare").ok()?;
            let outcome = match other.header.body.try_read() {
                Ok(theirs) => Some(compare_payloads(
                    mine.payload.as_ref(),
                    theirs.payload.as_ref(),
                )),
                Err(TryLockError::WouldBlock) => None,
                Err(TryLockError::Poisoned(_)) => return None,
            };
            drop(mine);
            match outcome {
                Some(result) => return result,
                None => std::thread::yield_now(),
            }
        }
    }

    /// Emits the payload's description as a debug event.
    ///
    /// Returns false when the payload has no log hook or is unavailable.
    #[must_use]
    pub fn log(&self) -> bool {
        let Ok(body) = self.read_body("log") else {
            return false;
        };
        let Some(payload) = body.payload.as_ref() else {
            return false;
        };
        let Some(loggable) = payload.as_loggable() else {
            return false;
        };
        debug!(
            target: "tessera::object",
            object = %self.identity(),
            type_name = payload.descriptor().name(),
            settings = %body.settings,
            refcount = body.refcount,
            "{}",
            loggable.describe()
        );
        true
    }

    /// Runs `f` with shared access to the payload, blocking for the read lock.
    ///
    /// # Errors
    ///
    /// Fails if the object was released or its lock is poisoned.
    pub fn with_read<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, ObjectError> {
        let body = self.read_body("with_read")?;
        body.payload
            .as_ref()
            .map(f)
            .ok_or_else(|| self.released_error())
    }

    /// Runs `f` with exclusive access to the payload, blocking for the write
    /// lock.
    ///
    /// # Errors
    ///
    /// Fails if the object was released or its lock is poisoned.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, ObjectError> {
        let mut body = self.write_body("with_write")?;
        body.payload
            .as_mut()
            .map(f)
            .ok_or_else(|| self.released_error())
    }

    /// Non-blocking variant of [`Object::with_read`].
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::WouldBlock`] when a writer holds the lock.
    pub fn try_with_read<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, ObjectError> {
        let body = match self.header.body.try_read() {
            Ok(body) => body,
            Err(TryLockError::WouldBlock) => return Err(ObjectError::would_block("try_with_read")),
            Err(TryLockError::Poisoned(_)) => return Err(ObjectError::poisoned("try_with_read")),
        };
        body.payload
            .as_ref()
            .map(f)
            .ok_or_else(|| self.released_error())
    }

    /// Non-blocking variant of [`Object::with_write`].
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::WouldBlock`] when any other holder has the lock.
    pub fn try_with_write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, ObjectError> {
        let mut body = match self.header.body.try_write() {
            Ok(body) => body,
            Err(TryLockError::WouldBlock) => {
                return Err(ObjectError::would_block("try_with_write"));
            }
            Err(TryLockError::Poisoned(_)) => return Err(ObjectError::poisoned("try_with_write")),
        };
        body.payload
            .as_mut()
            .map(f)
            .ok_or_else(|| self.released_error())
    }

    fn read_body(
        &self,
        operation: &'static str,
    ) -> Result<RwLockReadGuard<'_, Body<T>>, ObjectError> {
        self.header
            .body
            .read()
            .map_err(|_| ObjectError::poisoned(operation))
    }

    fn write_body(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, Body<T>>, ObjectError> {
        self.header
            .body
            .write()
            .map_err(|_| ObjectError::poisoned(operation))
    }

    fn released_error(&self) -> ObjectError {
        ObjectError::Released {
            identity: self.identity().get(),
        }
    }
}

fn compare_payloads<T: ObjectType, U: ObjectType>(
    mine: Option<&T>,
    theirs: Option<&U>,
) -> Option<Ordering> {
    let other: &dyn Any = theirs?;
    mine?.as_comparable()?.compare(other)
}

impl<T: ObjectType> fmt::Debug for Object<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("identity", &self.identity())
            .field("released", &self.is_released())
            .finish_non_exhaustive()
    }
}
