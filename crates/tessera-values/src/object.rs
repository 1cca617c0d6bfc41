//! Object-base integration for values.

use std::any::Any;
use std::cmp::Ordering;
use std::hash::{DefaultHasher, Hash, Hasher};

use tessera_object::{
    Comparable, Hashable, Initializable, Loggable, OBJECT_TYPE, ObjectType, TypeDescriptor,
};

use crate::value::Value;

/// Supertype of every value type.
pub static VALUE_TYPE: TypeDescriptor = TypeDescriptor::derived("value", &OBJECT_TYPE);
/// Nil values.
pub static NIL_TYPE: TypeDescriptor = TypeDescriptor::derived("value_nil", &VALUE_TYPE);
/// Boolean values.
pub static BOOL_TYPE: TypeDescriptor = TypeDescriptor::derived("value_bool", &VALUE_TYPE);
/// Integer values.
pub static INT_TYPE: TypeDescriptor = TypeDescriptor::derived("value_int", &VALUE_TYPE);
/// String values.
pub static STRING_TYPE: TypeDescriptor = TypeDescriptor::derived("value_string", &VALUE_TYPE);
/// Object identity values.
pub static OBJECT_ID_TYPE: TypeDescriptor =
    TypeDescriptor::derived("value_object_id", &VALUE_TYPE);
/// Set values.
pub static SET_TYPE: TypeDescriptor = TypeDescriptor::derived("value_set", &VALUE_TYPE);

impl ObjectType for Value {
    fn descriptor(&self) -> &'static TypeDescriptor {
        match self {
            Self::Unset => &VALUE_TYPE,
            Self::Nil => &NIL_TYPE,
            Self::Bool(_) => &BOOL_TYPE,
            Self::Int(_) => &INT_TYPE,
            Self::String(_) => &STRING_TYPE,
            Self::ObjectId(_) => &OBJECT_ID_TYPE,
            Self::Set(_) => &SET_TYPE,
        }
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        Some(self)
    }

    fn as_hashable(&self) -> Option<&dyn Hashable> {
        Some(self)
    }

    fn as_comparable(&self) -> Option<&dyn Comparable> {
        Some(self)
    }

    fn as_loggable(&self) -> Option<&dyn Loggable> {
        Some(self)
    }
}

impl Initializable for Value {
    fn init(&mut self) -> bool {
        self.reinit(self.value_type());
        true
    }
}

impl Hashable for Value {
    fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Comparable for Value {
    fn compare(&self, other: &dyn Any) -> Option<Ordering> {
        match (self, other.downcast_ref::<Self>()?) {
            (Self::Nil, Self::Nil) => Some(Ordering::Equal),
            (Self::Bool(left), Self::Bool(right)) => Some(left.cmp(right)),
            (Self::Int(left), Self::Int(right)) => Some(left.cmp(right)),
            (Self::String(left), Self::String(right)) => Some(left.cmp(right)),
            (Self::ObjectId(left), Self::ObjectId(right)) => Some(left.cmp(right)),
            (Self::Set(left), Self::Set(right)) => (left == right).then_some(Ordering::Equal),
            _ => None,
        }
    }
}

impl Loggable for Value {
    fn describe(&self) -> String {
        self.stringify()
            .unwrap_or_else(|_| String::from("<unset>"))
    }
}
