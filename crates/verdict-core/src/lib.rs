//! verdict-core
//!
//! Pure domain types and text transforms for judgment analysis: the section
//! parser, the context formatter, prompt assembly, and storage key
//! conventions. No AWS SDK dependency.

pub mod context;
pub mod keys;
pub mod models;
pub mod prompt;
pub mod sections;

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by the async trait seams in the other crates.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
