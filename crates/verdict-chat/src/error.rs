use thiserror::Error;
use verdict_bedrock::error::BedrockError;
use verdict_core::models::template::TemplateRole;
use verdict_storage::error::StorageError;
use verdict_storage::templates::TemplateSource;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("document is empty")]
    EmptyDocument,

    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[from] BedrockError),

    #[error("template {role} is not available: {source}")]
    Configuration {
        role: TemplateRole,
        #[source]
        source: StorageError,
    },

    #[error("document not found: {document_id}")]
    DocumentNotFound { document_id: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ChatError {
    /// Message suitable for showing to the end user.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::EmptyDocument => "⚠ 判決書內容為空，請上傳正確的文本。".to_string(),
            ChatError::BackendUnavailable(e) => format!("⚠ 發生錯誤：{e}"),
            ChatError::Configuration { role, .. } => format!(
                "⚠ 提示詞檔案未找到，請確認 {} 是否存在。",
                role.file_name()
            ),
            ChatError::DocumentNotFound { .. } => "⚠ 找不到上傳的檔案，請重新上傳。".to_string(),
            ChatError::Storage(e) => format!("⚠ 發生錯誤：{e}"),
        }
    }
}

/// Load a template, treating any failure as a configuration problem.
pub(crate) async fn load_template(
    templates: &dyn TemplateSource,
    role: TemplateRole,
) -> Result<String, ChatError> {
    templates
        .load(role)
        .await
        .map_err(|source| ChatError::Configuration { role, source })
}
