//! Judge protocol handling.
//!
//! Parses the line-oriented board and turn descriptions the judge writes to
//! the agent's stdin, and encodes and decodes the one-line actions exchanged
//! in both directions.

pub mod action;
pub mod input;

pub use action::{format_action, parse_action, ActionError};
pub use input::{InputError, InputReader};
