use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::section::ParsedSections;

/// One completed question/answer exchange. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    pub asked_at: jiff::Timestamp,
}

/// The continuity unit for one user: the uploaded document, its cached
/// analysis, and the follow-up conversation about it.
///
/// Fields are private so the lifecycle rules hold: replacing the document
/// resets the cache and history, the cache is written at most once per
/// document, and history is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: Uuid,
    document_id: Option<String>,
    #[serde(default)]
    document_text: String,
    cached_sections: Option<ParsedSections>,
    #[serde(default)]
    chat_history: Vec<ChatTurn>,
    created_at: jiff::Timestamp,
    updated_at: jiff::Timestamp,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id,
            document_id: None,
            document_text: String::new(),
            cached_sections: None,
            chat_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// The document text, or `None` when no document is attached or the
    /// attached text is blank.
    pub fn document_text(&self) -> Option<&str> {
        if self.document_text.trim().is_empty() {
            None
        } else {
            Some(&self.document_text)
        }
    }

    /// Attach a new document. Drops the cached analysis and the chat
    /// history, which both describe the previous document.
    pub fn replace_document(&mut self, document_id: impl Into<String>, text: impl Into<String>) {
        self.document_id = Some(document_id.into());
        self.document_text = text.into();
        self.cached_sections = None;
        self.chat_history.clear();
        self.touch();
    }

    pub fn cached_sections(&self) -> Option<&ParsedSections> {
        self.cached_sections.as_ref()
    }

    /// Store the analysis for the current document. An existing cache entry
    /// is kept; only [`Session::replace_document`] invalidates it.
    pub fn cache_sections(&mut self, sections: ParsedSections) -> &ParsedSections {
        if self.cached_sections.is_none() {
            self.updated_at = jiff::Timestamp::now();
        }
        self.cached_sections.get_or_insert(sections)
    }

    pub fn chat_history(&self) -> &[ChatTurn] {
        &self.chat_history
    }

    pub fn record_turn(&mut self, question: impl Into<String>, answer: impl Into<String>) -> &ChatTurn {
        let now = jiff::Timestamp::now();
        self.chat_history.push(ChatTurn {
            question: question.into(),
            answer: answer.into(),
            asked_at: now,
        });
        self.updated_at = now;
        &self.chat_history[self.chat_history.len() - 1]
    }

    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> jiff::Timestamp {
        self.updated_at
    }

    pub fn touch(&mut self) {
        self.updated_at = jiff::Timestamp::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
