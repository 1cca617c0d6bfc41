//! The tagged value type carried by statements and events.

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use tessera_object::ObjectId;

use crate::error::ValueError;
use crate::kind::ValueType;
use crate::set::ValueSet;

/// A dynamically typed value.
///
/// Every non-trivial variant owns its payload. [`Value::Unset`] is the
/// placeholder a value starts in before it is given a type; it cannot be
/// copied, rendered, or serialised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Value {
    /// No value yet.
    #[default]
    Unset,
    /// Explicit nil.
    Nil,
    /// Boolean payload.
    Bool(bool),
    /// Integer payload.
    Int(i64),
    /// String payload.
    String(String),
    /// Identity of a live object.
    ObjectId(ObjectId),
    /// Set of values.
    Set(ValueSet),
}

impl Value {
    /// Creates the zero state of `value_type`.
    ///
    /// The zero states are `false`, `0`, the empty string, object identity
    /// zero, and the empty set.
    #[must_use]
    pub const fn new(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Unset => Self::Unset,
            ValueType::Nil => Self::Nil,
            ValueType::Bool => Self::Bool(false),
            ValueType::Int => Self::Int(0),
            ValueType::String => Self::String(String::new()),
            ValueType::ObjectId => Self::ObjectId(ObjectId::from_raw(0)),
            ValueType::Set => Self::Set(ValueSet::new()),
        }
    }

    /// Builds a string value, reserving its buffer fallibly.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfMemory`] when the buffer cannot be reserved.
    pub fn string_from(text: &str) -> Result<Self, ValueError> {
        owned_text(text).map(Self::String)
    }

    /// Copies `source` into a new value of the same type.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Uninitialized`] if `source` is unset.
    pub fn copy_from(source: &Self) -> Result<Self, ValueError> {
        if source.is_valid() {
            Ok(source.clone())
        } else {
            Err(ValueError::uninitialized("copy"))
        }
    }

    /// Drops the current payload and reinitialises as the zero state of
    /// `value_type`.
    pub fn reinit(&mut self, value_type: ValueType) {
        *self = Self::new(value_type);
    }

    /// Returns the type tag.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Unset => ValueType::Unset,
            Self::Nil => ValueType::Nil,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::String(_) => ValueType::String,
            Self::ObjectId(_) => ValueType::ObjectId,
            Self::Set(_) => ValueType::Set,
        }
    }

    /// Returns false only for the unset placeholder.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.value_type().is_valid()
    }

    /// Returns the boolean payload.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer payload.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the object identity payload.
    #[must_use]
    pub const fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Self::ObjectId(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the set payload.
    #[must_use]
    pub const fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Stores a boolean into a boolean value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] for any other type.
    pub fn set_bool(&mut self, payload: bool) -> Result<(), ValueError> {
        match self {
            Self::Bool(value) => {
                *value = payload;
                Ok(())
            }
            other => Err(ValueError::mismatch(ValueType::Bool, other.value_type())),
        }
    }

    /// Stores an integer into an integer value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] for any other type.
    pub fn set_int(&mut self, payload: i64) -> Result<(), ValueError> {
        match self {
            Self::Int(value) => {
                *value = payload;
                Ok(())
            }
            other => Err(ValueError::mismatch(ValueType::Int, other.value_type())),
        }
    }

    /// Replaces the contents of a string value.
    ///
    /// The old contents stay in place if the new buffer cannot be reserved.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] for any other type and
    /// [`ValueError::OutOfMemory`] when the buffer cannot grow.
    pub fn set_str(&mut self, payload: &str) -> Result<(), ValueError> {
        match self {
            Self::String(value) => {
                *value = owned_text(payload)?;
                Ok(())
            }
            other => Err(ValueError::mismatch(ValueType::String, other.value_type())),
        }
    }

    /// Stores an object identity into an object identity value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] for any other type.
    pub fn set_object_id(&mut self, payload: ObjectId) -> Result<(), ValueError> {
        match self {
            Self::ObjectId(value) => {
                *value = payload;
                Ok(())
            }
            other => Err(ValueError::mismatch(ValueType::ObjectId, other.value_type())),
        }
    }

    /// Mutable access to a set value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] for any other type.
    pub fn set_mut(&mut self) -> Result<&mut ValueSet, ValueError> {
        match self {
            Self::Set(value) => Ok(value),
            other => Err(ValueError::mismatch(ValueType::Set, other.value_type())),
        }
    }

    /// Renders the value as owned text.
    ///
    /// Strings are quoted so that `"1"` and `1` stay distinguishable.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Uninitialized`] for the unset placeholder.
    pub fn stringify(&self) -> Result<String, ValueError> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<(), ValueError> {
        match self {
            Self::Unset => return Err(ValueError::uninitialized("stringify")),
            Self::Nil => out.push_str("nil"),
            Self::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            Self::Int(value) => out.push_str(&value.to_string()),
            Self::String(value) => out.push_str(&format!("{value:?}")),
            Self::ObjectId(value) => out.push_str(&value.to_string()),
            Self::Set(set) => {
                out.push('{');
                for (index, member) in set.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    member.render_into(out)?;
                }
                out.push('}');
            }
        }
        Ok(())
    }
}

fn owned_text(text: &str) -> Result<String, ValueError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(text.len())
        .map_err(|_| ValueError::OutOfMemory { bytes: text.len() })?;
    owned.push_str(text);
    Ok(owned)
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<ObjectId> for Value {
    fn from(value: ObjectId) -> Self {
        Self::ObjectId(value)
    }
}

impl From<ValueSet> for Value {
    fn from(value: ValueSet) -> Self {
        Self::Set(value)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => Err(S::Error::custom("cannot serialise an unset value")),
            Self::Nil => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::ObjectId(value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("object", &value.get())?;
                map.end()
            }
            Self::Set(set) => serializer.collect_seq(set.iter()),
        }
    }
}
