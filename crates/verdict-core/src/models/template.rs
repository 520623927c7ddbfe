use std::fmt;

use serde::{Deserialize, Serialize};

/// The three prompt templates the system reads, keyed by what they are
/// used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateRole {
    /// Instructions for the one-shot judgment analysis.
    Analysis,
    /// Instructions for answering a follow-up question.
    Followup,
    /// Instructions for proposing follow-up questions.
    Suggestion,
}

impl TemplateRole {
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateRole::Analysis => "prompt_template.txt",
            TemplateRole::Followup => "prompt_answer.txt",
            TemplateRole::Suggestion => "prompt_question.txt",
        }
    }
}

impl fmt::Display for TemplateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateRole::Analysis => "analysis_template",
            TemplateRole::Followup => "followup_template",
            TemplateRole::Suggestion => "suggestion_template",
        };
        f.write_str(name)
    }
}
