//! verdict-app library root.
//!
//! Configuration, AWS setup and wiring, exposed so integration tests can
//! exercise them without going through the binary.

pub mod aws;
pub mod cli;
pub mod config;
pub mod state;
