#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use verdict_bedrock::backend::{BoxFuture, TextGenerator};
use verdict_bedrock::error::BedrockError;
use verdict_chat::conversation::ConversationOrchestrator;
use verdict_core::models::template::TemplateRole;
use verdict_storage::documents::DocumentSource;
use verdict_storage::error::StorageError;
use verdict_storage::templates::TemplateSource;

pub const ANALYSIS_TEMPLATE: &str = "ANALYZE";
pub const FOLLOWUP_TEMPLATE: &str = "ANSWER";
pub const SUGGESTION_TEMPLATE: &str = "SUGGEST";

pub const ANALYSIS_REPLY: &str = "\
## 標題：某甲訴某乙損害賠償
## 案件種類：民事
## 案件概要：車禍
## 原告請求賠償：十萬元
## 適用法律：民法第184條、民法第195條
## 判決結果：原告一部勝訴
## 判決理由：被告有過失
";

/// How the fake backend answers one kind of call.
#[derive(Debug, Clone)]
pub enum Scripted {
    Text(String),
    Fail,
    Empty,
}

impl Scripted {
    pub fn text(s: &str) -> Self {
        Scripted::Text(s.to_string())
    }

    fn reply(&self) -> Result<String, BedrockError> {
        match self {
            Scripted::Text(s) => Ok(s.clone()),
            Scripted::Fail => Err(BedrockError::Invocation("connection reset".to_string())),
            Scripted::Empty => Err(BedrockError::EmptyResponse),
        }
    }
}

/// Backend that answers by which template the prompt starts with and
/// records every prompt it receives.
pub struct FakeBackend {
    pub analysis: Scripted,
    pub answer: Scripted,
    pub suggestion: Scripted,
    pub recorded: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn healthy() -> Self {
        Self {
            analysis: Scripted::text(ANALYSIS_REPLY),
            answer: Scripted::text("被告須賠償八萬元。"),
            suggestion: Scripted::text("• 可以上訴嗎？\n\n- 賠償如何計算？\n"),
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> usize {
        self.prompts().iter().filter(|p| p.starts_with(prefix)).count()
    }
}

impl TextGenerator for FakeBackend {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, BedrockError>> {
        Box::pin(async move {
            self.recorded.lock().unwrap().push(prompt.to_string());
            if prompt.starts_with(ANALYSIS_TEMPLATE) {
                self.analysis.reply()
            } else if prompt.starts_with(FOLLOWUP_TEMPLATE) {
                self.answer.reply()
            } else if prompt.starts_with(SUGGESTION_TEMPLATE) {
                self.suggestion.reply()
            } else {
                Err(BedrockError::Invocation(format!("unexpected prompt: {prompt}")))
            }
        })
    }
}

#[derive(Default)]
pub struct MemoryTemplates(HashMap<TemplateRole, String>);

impl MemoryTemplates {
    pub fn all() -> Self {
        let mut map = HashMap::new();
        map.insert(TemplateRole::Analysis, ANALYSIS_TEMPLATE.to_string());
        map.insert(TemplateRole::Followup, FOLLOWUP_TEMPLATE.to_string());
        map.insert(TemplateRole::Suggestion, SUGGESTION_TEMPLATE.to_string());
        Self(map)
    }

    pub fn without(mut self, role: TemplateRole) -> Self {
        self.0.remove(&role);
        self
    }
}

impl TemplateSource for MemoryTemplates {
    fn load(&self, role: TemplateRole) -> BoxFuture<'_, Result<String, StorageError>> {
        Box::pin(async move {
            self.0.get(&role).cloned().ok_or_else(|| StorageError::NotFound {
                key: role.file_name().to_string(),
            })
        })
    }
}

#[derive(Default)]
pub struct MemoryDocuments(HashMap<String, String>);

impl MemoryDocuments {
    pub fn with(mut self, id: &str, text: &str) -> Self {
        self.0.insert(id.to_string(), text.to_string());
        self
    }
}

impl DocumentSource for MemoryDocuments {
    fn fetch<'a>(&'a self, document_id: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move { Ok(self.0.get(document_id).cloned()) })
    }
}

pub fn orchestrator(
    backend: Arc<FakeBackend>,
    templates: MemoryTemplates,
    documents: MemoryDocuments,
) -> ConversationOrchestrator {
    ConversationOrchestrator::new(backend, Arc::new(templates), Arc::new(documents))
}
