//! Backend invocation.
//!
//! The orchestrators only need `prompt in, text out`, so the backend is a
//! one-method trait. [`BedrockGenerator`] implements it on the Bedrock
//! Converse API, sending the prompt as a single user message.
//!
//! A reply that contains no text is an error ([`BedrockError::EmptyResponse`])
//! so callers handle "nothing usable" and "call failed" the same way. Every
//! call is bounded by a timeout; expiry is [`BedrockError::Timeout`].

use std::time::Duration;

use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message};
use tracing::info;
pub use verdict_core::BoxFuture;

use crate::error::BedrockError;

/// Default upper bound on a single backend call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// An opaque generative-text service.
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the reply text. Blank replies are
    /// [`BedrockError::EmptyResponse`].
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, BedrockError>>;
}

/// [`TextGenerator`] backed by a Bedrock model via the Converse API.
#[derive(Debug, Clone)]
pub struct BedrockGenerator {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
    timeout: Duration,
}

impl BedrockGenerator {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_bedrockruntime::Client::new(config),
            model_id: model_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn converse(&self, prompt: &str) -> Result<String, BedrockError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt.to_string()))
            .build()
            .map_err(|e| BedrockError::Invocation(e.to_string()))?;

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .messages(message)
            .send()
            .await
            .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

        if let Some(usage) = response.usage() {
            info!(
                model_id = %self.model_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "model invocation complete"
            );
        }

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }
}

impl TextGenerator for BedrockGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, BedrockError>> {
        Box::pin(async move {
            let text = tokio::time::timeout(self.timeout, self.converse(prompt))
                .await
                .map_err(|_| BedrockError::Timeout(self.timeout))??;
            non_empty(text)
        })
    }
}

/// Reject replies with no visible text.
pub fn non_empty(text: String) -> Result<String, BedrockError> {
    if text.trim().is_empty() {
        Err(BedrockError::EmptyResponse)
    } else {
        Ok(text)
    }
}
