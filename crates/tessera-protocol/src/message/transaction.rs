//! Transactions and their flags.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::error::ModelError;
use crate::message::MessageId;
use crate::statement::Statement;

/// Flags attached to a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TransactionFlags(u8);

impl TransactionFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Execute the transaction immediately.
    pub const EXEC: Self = Self(1);
    /// Store the transaction under a name for later use.
    pub const REGISTER: Self = Self(1 << 1);

    /// Raw flag bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true when no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Sets or clears the bits of `other`.
    pub const fn set(&mut self, other: Self, enabled: bool) {
        if enabled {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl BitOr for TransactionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TransactionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for TransactionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [(Self::EXEC, "exec"), (Self::REGISTER, "register")]
            .into_iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
            .collect();
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

/// Ordered batch of statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    id: MessageId,
    statements: Vec<Statement>,
    flags: TransactionFlags,
    name: Option<String>,
}

impl Transaction {
    /// Creates an empty transaction.
    #[must_use]
    pub const fn new(id: MessageId) -> Self {
        Self {
            id,
            statements: Vec::new(),
            flags: TransactionFlags::NONE,
            name: None,
        }
    }

    /// Correlation identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Replaces the correlation identifier.
    pub const fn set_id(&mut self, id: MessageId) {
        self.id = id;
    }

    /// Statements in execution order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Appends a statement.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::OutOfMemory`] when the list cannot grow.
    pub fn push_statement(&mut self, statement: Statement) -> Result<(), ModelError> {
        self.statements
            .try_reserve(1)
            .map_err(|_| ModelError::out_of_memory("statement list"))?;
        self.statements.push(statement);
        Ok(())
    }

    /// Transaction flags.
    #[must_use]
    pub const fn flags(&self) -> TransactionFlags {
        self.flags
    }

    /// Replaces the flags.
    pub const fn set_flags(&mut self, flags: TransactionFlags) {
        self.flags = flags;
    }

    /// Registration name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the registration name and raises [`TransactionFlags::REGISTER`].
    pub fn register(&mut self, name: String) {
        self.name = Some(name);
        self.flags |= TransactionFlags::REGISTER;
    }
}
