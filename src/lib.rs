//! Sunwood agent library.
//!
//! Exposes the board model, tree economics, action selection and protocol
//! modules for use by integration tests, benchmarks and the binary entry
//! point.

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod protocol;
pub mod select;
pub mod trace;
