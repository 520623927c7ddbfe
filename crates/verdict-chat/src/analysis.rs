use std::sync::Arc;

use tracing::{info, warn};
use verdict_bedrock::backend::TextGenerator;
use verdict_core::models::section::ParsedSections;
use verdict_core::models::template::TemplateRole;
use verdict_core::prompt::build_analysis_prompt;
use verdict_core::sections;
use verdict_storage::templates::TemplateSource;

use crate::error::{load_template, ChatError};

/// Runs the one-shot judgment analysis.
#[derive(Clone)]
pub struct AnalysisOrchestrator {
    backend: Arc<dyn TextGenerator>,
    templates: Arc<dyn TemplateSource>,
}

impl AnalysisOrchestrator {
    pub fn new(backend: Arc<dyn TextGenerator>, templates: Arc<dyn TemplateSource>) -> Self {
        Self { backend, templates }
    }

    /// Analyze a judgment into [`ParsedSections`].
    ///
    /// Blank input is [`ChatError::EmptyDocument`] and a missing analysis
    /// template is [`ChatError::Configuration`]; neither contacts the
    /// backend. A backend failure does not fail the call: the result is
    /// [`ParsedSections::analysis_failed`] carrying the error description.
    pub async fn analyze(&self, document_text: &str) -> Result<ParsedSections, ChatError> {
        if document_text.trim().is_empty() {
            return Err(ChatError::EmptyDocument);
        }

        match self.invoke(document_text).await {
            Ok(raw) => {
                let sections = sections::parse(&raw);
                info!(
                    reply_len = raw.len(),
                    empty_fields = sections.iter().filter(|(_, v)| v.is_empty()).count(),
                    "judgment analysis complete"
                );
                Ok(sections)
            }
            Err(ChatError::BackendUnavailable(e)) => {
                warn!(error = %e, "judgment analysis failed, using placeholder sections");
                Ok(ParsedSections::analysis_failed(&e.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn invoke(&self, document_text: &str) -> Result<String, ChatError> {
        let template = load_template(self.templates.as_ref(), TemplateRole::Analysis).await?;
        let prompt = build_analysis_prompt(&template, document_text);
        info!(
            document_chars = document_text.chars().count(),
            "starting judgment analysis"
        );
        Ok(self.backend.generate(&prompt).await?)
    }
}
