//! Commands carried by a transaction.

use std::fmt;

use tessera_values::Value;

use crate::error::ModelError;

/// Position of an argument on the executor's value stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StackPosition(u64);

impl StackPosition {
    /// Wraps a raw stack position.
    #[must_use]
    pub const fn new(position: u64) -> Self {
        Self(position)
    }

    /// Returns the raw position.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StackPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A single statement argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// A literal value.
    Direct(Value),
    /// A reference to a value produced earlier on the stack.
    Indirect(StackPosition),
}

/// Argument encoding of a statement.
///
/// A command either lists its arguments or states how many it pops from the
/// stack. The two encodings never mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arguments {
    /// Explicit argument list, possibly empty.
    Listed(Vec<Argument>),
    /// Count of arguments taken implicitly from the stack.
    Implicit(u64),
}

impl Default for Arguments {
    fn default() -> Self {
        Self::Listed(Vec::new())
    }
}

/// A named command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    name: String,
    arguments: Arguments,
}

impl Statement {
    /// Creates a statement with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Arguments::default(),
        }
    }

    /// Creates a statement, copying `name` into fallibly reserved storage.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::OutOfMemory`] when the name cannot be stored.
    pub fn named(name: &str) -> Result<Self, ModelError> {
        let mut owned = String::new();
        owned
            .try_reserve_exact(name.len())
            .map_err(|_| ModelError::out_of_memory("command name"))?;
        owned.push_str(name);
        Ok(Self::new(owned))
    }

    /// Command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument encoding.
    #[must_use]
    pub const fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Listed arguments; empty for implicit statements.
    #[must_use]
    pub fn listed(&self) -> &[Argument] {
        match &self.arguments {
            Arguments::Listed(arguments) => arguments,
            Arguments::Implicit(_) => &[],
        }
    }

    /// Implicit argument count, if the statement uses that encoding.
    #[must_use]
    pub const fn implicit_count(&self) -> Option<u64> {
        match self.arguments {
            Arguments::Implicit(count) => Some(count),
            Arguments::Listed(_) => None,
        }
    }

    /// Appends a literal argument.
    ///
    /// # Errors
    ///
    /// Fails for the unset placeholder, for implicit statements, and when the
    /// argument list cannot grow.
    pub fn append_direct(&mut self, value: Value) -> Result<(), ModelError> {
        if !value.is_valid() {
            return Err(ModelError::UnsetValue {
                what: "direct argument",
            });
        }
        self.push(Argument::Direct(value))
    }

    /// Appends a stack reference.
    ///
    /// # Errors
    ///
    /// Fails for implicit statements and when the argument list cannot grow.
    pub fn append_indirect(&mut self, position: StackPosition) -> Result<(), ModelError> {
        self.push(Argument::Indirect(position))
    }

    /// Switches an argument-free statement to the implicit encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ListedArguments`] once arguments were listed.
    pub fn set_implicit(&mut self, count: u64) -> Result<(), ModelError> {
        match &self.arguments {
            Arguments::Listed(arguments) if !arguments.is_empty() => {
                Err(ModelError::ListedArguments {
                    name: self.name.clone(),
                })
            }
            _ => {
                self.arguments = Arguments::Implicit(count);
                Ok(())
            }
        }
    }

    fn push(&mut self, argument: Argument) -> Result<(), ModelError> {
        match &mut self.arguments {
            Arguments::Listed(arguments) => {
                arguments
                    .try_reserve(1)
                    .map_err(|_| ModelError::out_of_memory("argument list"))?;
                arguments.push(argument);
                Ok(())
            }
            Arguments::Implicit(_) => Err(ModelError::ImplicitArguments {
                name: self.name.clone(),
            }),
        }
    }
}
