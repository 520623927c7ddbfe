//! Follow-up conversation about an analyzed judgment.
//!
//! The orchestrator holds no per-user state. Everything it reads or writes
//! goes through the `&mut Session` the caller passes in, so serializing
//! requests for one session is a matter of holding that session's lock for
//! the duration of the call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use verdict_bedrock::backend::TextGenerator;
use verdict_core::models::section::ParsedSections;
use verdict_core::models::session::Session;
use verdict_core::models::template::TemplateRole;
use verdict_core::prompt::{build_prompt, DEFAULT_DOCUMENT_CAP};
use verdict_storage::documents::DocumentSource;
use verdict_storage::templates::TemplateSource;

use crate::analysis::AnalysisOrchestrator;
use crate::error::{load_template, ChatError};
use crate::suggest::suggest_questions;

/// Answer given when the session has no document to talk about.
pub const DOCUMENT_MISSING_ANSWER: &str = "⚠ 找不到已上傳的文件資料。";

/// Result of opening a document in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub sections: ParsedSections,
    pub suggested_questions: Vec<String>,
}

/// Result of one follow-up question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub answer: String,
    pub suggested_questions: Vec<String>,
}

#[derive(Clone)]
pub struct ConversationOrchestrator {
    backend: Arc<dyn TextGenerator>,
    templates: Arc<dyn TemplateSource>,
    documents: Arc<dyn DocumentSource>,
    analyzer: AnalysisOrchestrator,
    document_cap: usize,
}

impl ConversationOrchestrator {
    pub fn new(
        backend: Arc<dyn TextGenerator>,
        templates: Arc<dyn TemplateSource>,
        documents: Arc<dyn DocumentSource>,
    ) -> Self {
        let analyzer = AnalysisOrchestrator::new(backend.clone(), templates.clone());
        Self {
            backend,
            templates,
            documents,
            analyzer,
            document_cap: DEFAULT_DOCUMENT_CAP,
        }
    }

    /// Number of document characters included in answer and suggestion
    /// prompts.
    pub fn with_document_cap(mut self, cap: usize) -> Self {
        self.document_cap = cap;
        self
    }

    /// Load `document_id` into the session, analyze it and propose
    /// questions.
    ///
    /// Replaces whatever document the session held, which also clears its
    /// cached analysis and chat history.
    pub async fn open_document(
        &self,
        session: &mut Session,
        document_id: &str,
    ) -> Result<AnalysisReport, ChatError> {
        let text = self
            .documents
            .fetch(document_id)
            .await?
            .ok_or_else(|| ChatError::DocumentNotFound {
                document_id: document_id.to_string(),
            })?;

        session.replace_document(document_id, text);
        info!(session_id = %session.id(), document_id, "document opened");

        let document = session.document_text().unwrap_or_default();
        let sections = self.analyzer.analyze(document).await?;
        let suggested_questions = suggest_questions(
            self.backend.as_ref(),
            self.templates.as_ref(),
            document,
            self.document_cap,
        )
        .await;

        let sections = session.cache_sections(sections).clone();
        Ok(AnalysisReport {
            sections,
            suggested_questions,
        })
    }

    /// Answer a follow-up question about the session's document.
    ///
    /// Runs the analysis first if the session has a document but no cached
    /// sections. Without a document, answers [`DOCUMENT_MISSING_ANSWER`]
    /// without contacting the backend. A backend failure becomes an error
    /// description in the answer. Either way the exchange is appended to
    /// the chat history. Only a missing template fails the call, and then
    /// nothing is recorded.
    pub async fn ask(&self, session: &mut Session, question: &str) -> Result<Reply, ChatError> {
        if session.cached_sections().is_none()
            && let Some(document) = session.document_text()
        {
            let sections = self.analyzer.analyze(document).await?;
            session.cache_sections(sections);
        }

        let Some(document) = session.document_text() else {
            warn!(session_id = %session.id(), "question asked without a document");
            session.record_turn(question, DOCUMENT_MISSING_ANSWER);
            return Ok(Reply {
                answer: DOCUMENT_MISSING_ANSWER.to_string(),
                suggested_questions: Vec::new(),
            });
        };

        let template = load_template(self.templates.as_ref(), TemplateRole::Followup).await?;
        let prompt = build_prompt(
            &template,
            document,
            session.chat_history(),
            question,
            self.document_cap,
        );

        let answer = match self.backend.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(session_id = %session.id(), error = %e, "answer generation failed");
                ChatError::BackendUnavailable(e).user_message()
            }
        };

        let suggested_questions = suggest_questions(
            self.backend.as_ref(),
            self.templates.as_ref(),
            document,
            self.document_cap,
        )
        .await;

        session.record_turn(question, answer.clone());
        info!(
            session_id = %session.id(),
            turns = session.chat_history().len(),
            suggestions = suggested_questions.len(),
            "question answered"
        );

        Ok(Reply {
            answer,
            suggested_questions,
        })
    }
}
