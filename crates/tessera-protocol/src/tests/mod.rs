//! Unit and behavioural tests for the control protocol.

mod json_tests;
mod support;
mod transition_tests;
mod wire_tests;
