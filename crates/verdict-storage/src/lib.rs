//! verdict-storage
//!
//! Where templates, documents and sessions live: local directories, S3, and
//! the in-process session store.

pub mod documents;
pub mod error;
pub mod objects;
pub mod sessions;
pub mod state;
pub mod templates;

pub use verdict_core::BoxFuture;
