//! Drives a [`MessageDeserializer`] from `serde_json`'s tokenizer.
//!
//! The adapter is a [`DeserializeSeed`] that visits the document with
//! `deserialize_any` and forwards each syntactic event as a [`Token`]. It
//! never builds an intermediate `serde_json::Value`.

use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Unexpected, Visitor};
use tessera_object::ErrorKind;
use thiserror::Error;

use crate::deserializer::{DeserializeError, Flow, MessageDeserializer, Token};
use crate::message::Message;

/// Failure to decode one JSON document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes were not a JSON document the tokenizer accepts.
    #[error("malformed JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The document did not describe a valid message.
    #[error(transparent)]
    Deserialize(#[from] DeserializeError),
}

impl DecodeError {
    /// Maps the error onto its broad failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Json(_) => ErrorKind::ProtocolError,
            Self::Deserialize(error) => error.kind(),
        }
    }

    /// Negative errno-style code used in error replies.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Json(_) => -71,
            Self::Deserialize(error) => error.code(),
        }
    }
}

/// Decodes a single message from a JSON document.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] for syntax errors, trailing data, floats,
/// and integers outside the signed 64-bit range. Returns
/// [`DecodeError::Deserialize`] when the document is valid JSON but not a
/// valid message.
pub fn decode(input: &[u8]) -> Result<Message, DecodeError> {
    let mut machine = MessageDeserializer::new();
    let mut tokenizer = serde_json::Deserializer::from_slice(input);
    let fed = Forwarder {
        machine: &mut machine,
    }
    .deserialize(&mut tokenizer);
    if let Err(error) = fed {
        return Err(machine
            .error()
            .cloned()
            .map_or(DecodeError::Json(error), DecodeError::Deserialize));
    }
    tokenizer.end().map_err(DecodeError::Json)?;
    Ok(machine.take_message()?)
}

/// Decodes a single message from a JSON string.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_str(input: &str) -> Result<Message, DecodeError> {
    decode(input.as_bytes())
}

struct Forwarder<'m> {
    machine: &'m mut MessageDeserializer,
}

impl Forwarder<'_> {
    fn push<E: de::Error>(&mut self, token: Token<'_>) -> Result<(), E> {
        match self.machine.feed(token) {
            Flow::Continue => Ok(()),
            Flow::Stop if self.machine.is_ready() => Ok(()),
            Flow::Stop => Err(E::custom("message deserializer stopped")),
        }
    }

    fn nested(&mut self) -> Forwarder<'_> {
        Forwarder {
            machine: &mut *self.machine,
        }
    }
}

impl<'de> DeserializeSeed<'de> for Forwarder<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Forwarder<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a control message")
    }

    fn visit_unit<E: de::Error>(mut self) -> Result<(), E> {
        self.push(Token::Null)
    }

    fn visit_bool<E: de::Error>(mut self, value: bool) -> Result<(), E> {
        self.push(Token::Bool(value))
    }

    fn visit_i64<E: de::Error>(mut self, value: i64) -> Result<(), E> {
        self.push(Token::Int(value))
    }

    fn visit_u64<E: de::Error>(mut self, value: u64) -> Result<(), E> {
        let signed = i64::try_from(value)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &"a signed 64-bit integer"))?;
        self.push(Token::Int(signed))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<(), E> {
        Err(E::invalid_type(Unexpected::Float(value), &self))
    }

    fn visit_str<E: de::Error>(mut self, value: &str) -> Result<(), E> {
        self.push(Token::String(value))
    }

    fn visit_map<A: MapAccess<'de>>(mut self, mut map: A) -> Result<(), A::Error> {
        self.push::<A::Error>(Token::StartMap)?;
        while let Some(key) = map.next_key::<String>()? {
            self.push::<A::Error>(Token::MapKey(&key))?;
            map.next_value_seed(self.nested())?;
        }
        self.push(Token::EndMap)
    }

    fn visit_seq<A: SeqAccess<'de>>(mut self, mut seq: A) -> Result<(), A::Error> {
        self.push::<A::Error>(Token::StartArray)?;
        while seq.next_element_seed(self.nested())?.is_some() {}
        self.push(Token::EndArray)
    }
}
