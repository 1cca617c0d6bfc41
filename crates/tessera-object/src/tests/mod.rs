//! Unit and behavioural tests for the object base.

mod support;
