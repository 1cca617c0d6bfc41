//! Tagged values for the Tessera control plane.
//!
//! A [`Value`] is one of nil, bool, int, string, object identity, or set, or
//! the [`Value::Unset`] placeholder. Values own their payloads, can be copied
//! and re-typed in place, render to text, and serialise to the wire form used
//! by control messages. Values are also object payloads, so they can be
//! shared through [`tessera_object::Object`].
//!
//! # Example
//!
//! ```
//! use tessera_values::{Value, ValueType};
//!
//! let mut value = Value::new(ValueType::Int);
//! value.set_int(42)?;
//! assert_eq!(value.stringify()?, "42");
//!
//! value.reinit(ValueType::String);
//! value.set_str("left")?;
//! assert_eq!(Value::copy_from(&value)?, Value::from("left"));
//! # Ok::<(), tessera_values::ValueError>(())
//! ```

mod error;
mod kind;
mod object;
mod set;
mod value;

pub use error::ValueError;
pub use kind::ValueType;
pub use object::{
    BOOL_TYPE, INT_TYPE, NIL_TYPE, OBJECT_ID_TYPE, SET_TYPE, STRING_TYPE, VALUE_TYPE,
};
pub use set::ValueSet;
pub use value::Value;

#[cfg(test)]
mod tests;
