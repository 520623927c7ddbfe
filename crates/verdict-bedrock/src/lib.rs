//! verdict-bedrock
//!
//! The generative-text backend: a small trait the orchestrators depend on,
//! and its Bedrock Converse implementation.

pub mod backend;
pub mod error;
