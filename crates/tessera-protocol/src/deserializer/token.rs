//! Tokens produced by a JSON tokenizer.

use strum::Display;

/// One syntactic event of a JSON document.
///
/// Strings and keys borrow from the tokenizer and are only valid for the
/// duration of the call that receives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A string scalar.
    String(&'a str),
    /// `{`.
    StartMap,
    /// A key inside a map.
    MapKey(&'a str),
    /// `}`.
    EndMap,
    /// `[`.
    StartArray,
    /// `]`.
    EndArray,
}

impl Token<'_> {
    /// Payload-free discriminant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Null => TokenKind::Null,
            Self::Bool(_) => TokenKind::Bool,
            Self::Int(_) => TokenKind::Int,
            Self::String(_) => TokenKind::String,
            Self::StartMap => TokenKind::StartMap,
            Self::MapKey(_) => TokenKind::MapKey,
            Self::EndMap => TokenKind::EndMap,
            Self::StartArray => TokenKind::StartArray,
            Self::EndArray => TokenKind::EndArray,
        }
    }
}

/// Discriminant of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TokenKind {
    /// See [`Token::Null`].
    Null,
    /// See [`Token::Bool`].
    Bool,
    /// See [`Token::Int`].
    Int,
    /// See [`Token::String`].
    String,
    /// See [`Token::StartMap`].
    StartMap,
    /// See [`Token::MapKey`].
    MapKey,
    /// See [`Token::EndMap`].
    EndMap,
    /// See [`Token::StartArray`].
    StartArray,
    /// See [`Token::EndArray`].
    EndArray,
}

/// Whether the tokenizer should keep feeding tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Feed the next token.
    Continue,
    /// Stop; the message is ready or a fatal error occurred.
    Stop,
}
