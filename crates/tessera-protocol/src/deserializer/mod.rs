//! Streaming message deserializer.
//!
//! A [`MessageDeserializer`] receives one [`Token`] at a time from a JSON
//! tokenizer and assembles exactly one [`Message`]. Grammar decisions live in
//! the pure [`transition`] function; this module owns the data accumulated
//! along the way and the nesting counters that decide when the document is
//! complete.
//!
//! After every closing brace the deserializer checks both nesting counters.
//! When they are zero and the grammar was followed, the message is finalised
//! and [`Flow::Stop`] is returned. A grammar violation moves the machine into
//! [`State::Invalid`], which absorbs the rest of the document without ever
//! becoming ready. Allocation failure is fatal for the session: it is kept as
//! a sticky error and every later call stops immediately.

mod error;
mod state;
mod token;
mod transition;

use tessera_values::{Value, ValueError};
use tracing::{debug, trace, warn};

pub use error::DeserializeError;
pub use state::{State, next_state_for_key};
pub use token::{Flow, Token, TokenKind};
pub use transition::{Effect, Scalar, Transition, transition};

use crate::error::ModelError;
use crate::keys;
use crate::message::{Event, Message, MessageId, Transaction, TransactionFlags};
use crate::statement::Statement;

const LOG_TARGET: &str = "tessera::deserializer";

/// First grammar violation seen by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    /// State the offending token was read in.
    pub state: State,
    /// Offending token.
    pub token: TokenKind,
    /// Short description.
    pub reason: &'static str,
}

impl From<Violation> for DeserializeError {
    fn from(value: Violation) -> Self {
        Self::Protocol {
            state: value.state,
            token: value.token,
            reason: value.reason,
        }
    }
}

enum Fault {
    Fatal(DeserializeError),
    Grammar(&'static str),
}

impl From<ModelError> for Fault {
    fn from(value: ModelError) -> Self {
        match value {
            ModelError::OutOfMemory { what } => Self::Fatal(DeserializeError::OutOfMemory { what }),
            ModelError::Value(ValueError::OutOfMemory { .. }) => {
                Self::Fatal(DeserializeError::OutOfMemory { what: "value" })
            }
            ModelError::ImplicitArguments { .. } | ModelError::ListedArguments { .. } => {
                Self::Grammar("argument encodings cannot be mixed")
            }
            _ => Self::Grammar("command rejected its argument"),
        }
    }
}

/// Incremental deserializer for one control message.
#[derive(Debug, Default)]
pub struct MessageDeserializer {
    state: State,
    maps: usize,
    arrays: usize,
    cached_id: Option<MessageId>,
    transaction: Option<Transaction>,
    statement: Option<Statement>,
    flags: TransactionFlags,
    register_name: Option<String>,
    has_event: bool,
    event_name: Option<String>,
    event_value: Option<Value>,
    ready: bool,
    outcome: Option<Result<Message, DeserializeError>>,
    violation: Option<Violation>,
    error: Option<DeserializeError>,
}

impl MessageDeserializer {
    /// Creates a deserializer in [`State::Init`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current grammar state.
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Open map count.
    #[must_use]
    pub const fn map_depth(&self) -> usize {
        self.maps
    }

    /// Open array count.
    #[must_use]
    pub const fn array_depth(&self) -> usize {
        self.arrays
    }

    /// Returns true once the document completed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns true once the grammar was violated.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.state == State::Invalid
    }

    /// Sticky fatal error, if one occurred.
    #[must_use]
    pub const fn error(&self) -> Option<&DeserializeError> {
        self.error.as_ref()
    }

    /// First grammar violation, if any.
    #[must_use]
    pub const fn violation(&self) -> Option<Violation> {
        self.violation
    }

    /// Feeds one token.
    ///
    /// Returns [`Flow::Stop`] when the message is ready, when it was already
    /// ready, or after a fatal error. Invalid documents keep returning
    /// [`Flow::Continue`] so the tokenizer can consume them to the end.
    pub fn feed(&mut self, token: Token<'_>) -> Flow {
        if self.ready || self.error.is_some() {
            return Flow::Stop;
        }
        let previous = self.state;
        trace!(target: LOG_TARGET, token = %token.kind(), state = %previous, "token");

        if !self.track_nesting(token) {
            self.invalidate(previous, token.kind(), "unbalanced nesting");
        }

        let step = transition(self.state, token);
        if step.next == State::Invalid && previous != State::Invalid {
            self.invalidate(previous, token.kind(), "token not allowed here");
        } else {
            self.state = step.next;
        }

        if let Err(fault) = self.apply(step.effect) {
            match fault {
                Fault::Fatal(error) => {
                    warn!(target: LOG_TARGET, %error, "deserializer failed");
                    self.error = Some(error);
                    return Flow::Stop;
                }
                Fault::Grammar(reason) => self.invalidate(previous, token.kind(), reason),
            }
        }

        if token == Token::EndMap && self.maps == 0 && self.arrays == 0 && !self.is_invalid() {
            let outcome = self.finalize();
            match &outcome {
                Ok(message) => debug!(
                    target: LOG_TARGET,
                    kind = %message.kind(),
                    id = message.id().get(),
                    "message ready"
                ),
                Err(error) => debug!(target: LOG_TARGET, %error, "document rejected"),
            }
            self.outcome = Some(outcome);
            self.ready = true;
            return Flow::Stop;
        }
        Flow::Continue
    }

    /// Hands out the finished message.
    ///
    /// # Errors
    ///
    /// Returns the sticky fatal error, the first grammar violation,
    /// [`DeserializeError::NotReady`] for incomplete input, the finalisation
    /// error of a completed document, or [`DeserializeError::AlreadyTaken`].
    pub fn take_message(&mut self) -> Result<Message, DeserializeError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        if let Some(violation) = self.violation {
            return Err(violation.into());
        }
        if !self.ready {
            return Err(DeserializeError::NotReady);
        }
        self.outcome
            .take()
            .unwrap_or(Err(DeserializeError::AlreadyTaken))
    }

    /// Discards all partial data and returns to [`State::Init`].
    pub fn reset(&mut self) {
        if self.transaction.is_some() || self.statement.is_some() || self.has_event {
            debug!(target: LOG_TARGET, state = %self.state, "discarding partial message");
        }
        *self = Self::default();
    }

    fn track_nesting(&mut self, token: Token<'_>) -> bool {
        match token {
            Token::StartMap => self.maps += 1,
            Token::StartArray => self.arrays += 1,
            Token::EndMap => match self.maps.checked_sub(1) {
                Some(depth) => self.maps = depth,
                None => return false,
            },
            Token::EndArray => match self.arrays.checked_sub(1) {
                Some(depth) => self.arrays = depth,
                None => return false,
            },
            _ => {}
        }
        true
    }

    fn invalidate(&mut self, state: State, token: TokenKind, reason: &'static str) {
        if self.violation.is_none() {
            debug!(target: LOG_TARGET, %state, %token, reason, "document invalid");
            self.violation = Some(Violation {
                state,
                token,
                reason,
            });
        }
        self.state = State::Invalid;
    }

    fn apply(&mut self, effect: Effect<'_>) -> Result<(), Fault> {
        match effect {
            Effect::None => {}
            Effect::AssignId(raw) => {
                let id = MessageId::new(raw);
                match &mut self.transaction {
                    Some(transaction) => transaction.set_id(id),
                    None => self.cached_id = Some(id),
                }
            }
            Effect::BeginTransaction => self.setup_transaction(),
            Effect::MarkEvent => self.has_event = true,
            Effect::BeginStatement(name) => {
                if self.statement.is_some() {
                    return Err(Fault::Grammar("command map holds more than one command"));
                }
                self.statement = Some(Statement::named(name)?);
            }
            Effect::AppendDirect(scalar) => {
                let value = scalar.to_value().map_err(ModelError::from)?;
                self.pending_statement()?.append_direct(value)?;
            }
            Effect::AppendIndirect(position) => {
                self.pending_statement()?.append_indirect(position)?;
            }
            Effect::ImplicitArguments(count) => {
                self.pending_statement()?.set_implicit(count)?;
            }
            Effect::FinishStatement => {
                if let Some(statement) = self.statement.take() {
                    self.setup_transaction();
                    if let Some(transaction) = &mut self.transaction {
                        transaction.push_statement(statement)?;
                    }
                }
            }
            Effect::SetExec(enabled) => self.flags.set(TransactionFlags::EXEC, enabled),
            Effect::Register(name) => {
                self.register_name = Some(copy_text(name, "registration name")?);
                self.flags |= TransactionFlags::REGISTER;
            }
            Effect::EventName(name) => {
                self.has_event = true;
                self.event_name = Some(copy_text(name, "event name")?);
            }
            Effect::EventValue(scalar) => {
                self.has_event = true;
                self.event_value = Some(scalar.to_value().map_err(ModelError::from)?);
            }
        }
        Ok(())
    }

    fn setup_transaction(&mut self) {
        if self.transaction.is_none() {
            let id = self.cached_id.unwrap_or_default();
            self.transaction = Some(Transaction::new(id));
        }
    }

    fn pending_statement(&mut self) -> Result<&mut Statement, Fault> {
        self.statement
            .as_mut()
            .ok_or(Fault::Grammar("argument outside a command"))
    }

    fn finalize(&mut self) -> Result<Message, DeserializeError> {
        if let Some(mut transaction) = self.transaction.take() {
            if self.has_event {
                debug!(target: LOG_TARGET, "ignoring event fields of a transaction");
            }
            transaction.set_flags(self.flags);
            if let Some(name) = self.register_name.take() {
                transaction.register(name);
            }
            return Ok(Message::Transaction(transaction));
        }
        if self.has_event {
            let name = self
                .event_name
                .take()
                .ok_or(DeserializeError::IncompleteEvent {
                    missing: keys::EVENT_NAME,
                })?;
            let context = self
                .event_value
                .take()
                .ok_or(DeserializeError::IncompleteEvent {
                    missing: keys::EVENT_VALUE,
                })?;
            let id = self.cached_id.unwrap_or_default();
            return Event::new(id, name, context)
                .map(Message::Event)
                .map_err(|_| DeserializeError::IncompleteEvent {
                    missing: keys::EVENT_VALUE,
                });
        }
        Err(DeserializeError::EmptyMessage)
    }
}

fn copy_text(text: &str, what: &'static str) -> Result<String, Fault> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(text.len())
        .map_err(|_| Fault::Fatal(DeserializeError::OutOfMemory { what }))?;
    owned.push_str(text);
    Ok(owned)
}
