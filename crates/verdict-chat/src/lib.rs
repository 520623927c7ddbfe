//! verdict-chat
//!
//! Judgment analysis and follow-up conversation over a [`Session`]:
//! one analysis call per document, cached in the session, then one
//! answer call and one suggestion call per question.
//!
//! [`Session`]: verdict_core::models::session::Session

pub mod analysis;
pub mod conversation;
pub mod error;
pub mod suggest;
