//! Object key conventions.
//!
//! Pure string functions. These define where documents, prompt templates and
//! persisted sessions live in a bucket.

use uuid::Uuid;

use crate::models::template::TemplateRole;

pub const DOCUMENTS_PREFIX: &str = "documents/";

pub const TEMPLATES_PREFIX: &str = "templates/";

pub const SESSIONS_PREFIX: &str = "sessions/";

pub fn document(id: &str) -> String {
    format!("{DOCUMENTS_PREFIX}{id}")
}

pub fn template(role: TemplateRole) -> String {
    format!("{TEMPLATES_PREFIX}{}", role.file_name())
}

pub fn session(id: Uuid) -> String {
    format!("{SESSIONS_PREFIX}{id}.json")
}
