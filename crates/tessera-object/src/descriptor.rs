//! Static type descriptors forming a single-inheritance chain.
//!
//! Every descriptor lives in static storage and points at its supertype. The
//! chain always terminates at [`OBJECT_TYPE`], which has no supertype.

use std::fmt;

/// Upper bound on the supertype chain length accepted by [`TypeDescriptor::depth`].
///
/// Descriptors are declared statically, so a longer chain indicates a
/// declaration mistake rather than a runtime condition.
pub const MAX_TYPE_DEPTH: usize = 32;

/// The root of every type chain.
pub static OBJECT_TYPE: TypeDescriptor = TypeDescriptor::root("object");

/// Identity record for a polymorphic object type.
#[derive(Debug)]
pub struct TypeDescriptor {
    name: &'static str,
    supertype: Option<&'static TypeDescriptor>,
}

impl TypeDescriptor {
    /// Declares a root descriptor without a supertype.
    ///
    /// Only [`OBJECT_TYPE`] should be declared this way; subtypes use
    /// [`TypeDescriptor::derived`].
    #[must_use]
    pub const fn root(name: &'static str) -> Self {
        Self {
            name,
            supertype: None,
        }
    }

    /// Declares a descriptor derived from `supertype`.
    #[must_use]
    pub const fn derived(name: &'static str, supertype: &'static Self) -> Self {
        Self {
            name,
            supertype: Some(supertype),
        }
    }

    /// Returns the type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the direct supertype, or `None` for the root.
    #[must_use]
    pub const fn supertype(&self) -> Option<&'static Self> {
        self.supertype
    }

    /// Returns true when this descriptor has no supertype.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.supertype.is_none()
    }

    /// Iterates from this descriptor up to and including the root.
    #[must_use]
    pub const fn ancestors(&'static self) -> Ancestors {
        Ancestors {
            next: Some(self),
            remaining: MAX_TYPE_DEPTH,
        }
    }

    /// Number of supertype links between this descriptor and the root.
    #[must_use]
    pub fn depth(&'static self) -> usize {
        self.ancestors().count().saturating_sub(1)
    }

    /// Returns true if `other` appears anywhere in this descriptor's chain.
    ///
    /// Descriptors are compared by address, so two distinct statics with the
    /// same name are different types.
    #[must_use]
    pub fn is_subtype_of(&'static self, other: &'static Self) -> bool {
        self.ancestors().any(|candidate| candidate.same_as(other))
    }

    /// Address identity comparison.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Iterator over a descriptor chain, bounded by [`MAX_TYPE_DEPTH`].
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<&'static TypeDescriptor>,
    remaining: usize,
}

impl Iterator for Ancestors {
    type Item = &'static TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = current.supertype();
        Some(current)
    }
}
