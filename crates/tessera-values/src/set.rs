//! Insertion-ordered value sets.

use crate::error::ValueError;
use crate::value::Value;

/// Set of values that keeps insertion order and rejects duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ValueSet {
    members: Vec<Value>,
}

impl ValueSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Inserts `value`, returning false if an equal member already exists.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Uninitialized`] for the unset placeholder and
    /// [`ValueError::OutOfMemory`] when the set cannot grow.
    pub fn insert(&mut self, value: Value) -> Result<bool, ValueError> {
        if !value.is_valid() {
            return Err(ValueError::uninitialized("insert"));
        }
        if self.members.contains(&value) {
            return Ok(false);
        }
        self.members
            .try_reserve(1)
            .map_err(|_| ValueError::OutOfMemory {
                bytes: size_of::<Value>(),
            })?;
        self.members.push(value);
        Ok(true)
    }

    /// Removes the member equal to `value`, returning whether one existed.
    pub fn remove(&mut self, value: &Value) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != value);
        self.members.len() != before
    }

    /// Returns true if an equal member exists.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.members.contains(value)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true when the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.members.iter()
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
