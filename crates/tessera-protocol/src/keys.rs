//! Literal keys and type names of the JSON wire format.

/// Message identifier.
pub const UID: &str = "uid";
/// Message type selector.
pub const TYPE: &str = "type";
/// Command array of a transaction.
pub const COMMANDS: &str = "commands";
/// Transaction flag map.
pub const FLAGS: &str = "flags";
/// Execute flag inside the flag map.
pub const FLAG_EXEC: &str = "exec";
/// Registration name inside the flag map.
pub const FLAG_REGISTER: &str = "register";
/// Event name.
pub const EVENT_NAME: &str = "event_name";
/// Event context value.
pub const EVENT_VALUE: &str = "event_value";
/// Stack position key of an indirect argument.
pub const POS: &str = "pos";
/// Reply value.
pub const VALUE: &str = "value";
/// Reply error object.
pub const ERROR: &str = "error";

/// `type` literal selecting a transaction.
pub const TYPE_TRANSACTION: &str = "transaction";
/// `type` literal selecting an event.
pub const TYPE_EVENT: &str = "event";
/// `type` literal emitted for replies.
pub const TYPE_REPLY: &str = "reply";
/// Numeric code inside a reply error.
pub const CODE: &str = "code";
/// Description inside a reply error.
pub const DESCRIPTION: &str = "description";
