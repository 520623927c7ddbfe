//! Suggested follow-up questions.
//!
//! Suggestions are a convenience: every failure here degrades to an empty
//! list and a warning, never an error.

use tracing::{debug, warn};
use verdict_bedrock::backend::TextGenerator;
use verdict_core::models::template::TemplateRole;
use verdict_core::prompt::{build_suggestion_prompt, parse_suggestions};
use verdict_storage::templates::TemplateSource;

pub async fn suggest_questions(
    backend: &dyn TextGenerator,
    templates: &dyn TemplateSource,
    document_text: &str,
    cap: usize,
) -> Vec<String> {
    let template = match templates.load(TemplateRole::Suggestion).await {
        Ok(template) => template,
        Err(e) => {
            warn!(error = %e, "suggestion template unavailable, skipping suggestions");
            return Vec::new();
        }
    };

    let prompt = build_suggestion_prompt(&template, document_text, cap);
    match backend.generate(&prompt).await {
        Ok(raw) => {
            let questions = parse_suggestions(&raw);
            debug!(count = questions.len(), "suggested questions generated");
            questions
        }
        Err(e) => {
            warn!(error = %e, "suggested question generation failed");
            Vec::new()
        }
    }
}
