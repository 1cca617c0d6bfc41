//! Per-object settings flags.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Flag set stored alongside every object.
///
/// The base layer only stores these flags; subsystems interpret them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ObjectSettings(u8);

impl ObjectSettings {
    /// No settings applied.
    pub const NONE: Self = Self(0);
    /// The object must not be mutated by its consumers.
    pub const LOCKED: Self = Self(1);
    /// The object must not be specialised further.
    pub const FINAL: Self = Self(1 << 1);

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true when every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true when no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns a copy with the flags in `other` cleared.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for ObjectSettings {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ObjectSettings {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ObjectSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04b}", self.0)
    }
}
