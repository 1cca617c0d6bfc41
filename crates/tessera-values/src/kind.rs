//! Type tags for values.

use strum::{Display, EnumString};

/// Discriminant of a [`crate::Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ValueType {
    /// The "no value yet" placeholder.
    Unset,
    /// Explicit nil.
    Nil,
    /// Boolean.
    Bool,
    /// Signed 64-bit integer.
    Int,
    /// Owned UTF-8 string.
    String,
    /// Reference to an object by identity.
    ObjectId,
    /// Insertion-ordered set of values.
    Set,
}

impl ValueType {
    /// Returns false only for [`ValueType::Unset`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Unset)
    }
}
