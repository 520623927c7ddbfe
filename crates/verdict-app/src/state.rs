use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;
use verdict_bedrock::backend::BedrockGenerator;
use verdict_chat::conversation::ConversationOrchestrator;
use verdict_core::models::session::Session;
use verdict_storage::documents::{DirDocuments, DocumentSource, S3Documents};
use verdict_storage::sessions::{self, SessionHandle, SessionStore};
use verdict_storage::templates::{DirTemplates, S3Templates, TemplateSource};

use crate::aws::build_aws_config;
use crate::config::{Location, VerdictConfig};

/// Everything a request needs: live sessions, the orchestrator, and where
/// to persist sessions if anywhere.
pub struct AppState {
    pub sessions: SessionStore,
    pub chat: ConversationOrchestrator,
    session_bucket: Option<(aws_sdk_s3::Client, String)>,
}

impl AppState {
    pub async fn from_config(config: &VerdictConfig) -> Self {
        let aws_config = build_aws_config(&config.region, &config.credentials).await;
        let s3 = aws_sdk_s3::Client::new(&aws_config);

        let backend = BedrockGenerator::new(&aws_config, config.model_id.clone())
            .with_timeout(Duration::from_secs(config.backend_timeout_secs));
        info!(
            model_id = backend.model_id(),
            timeout_secs = config.backend_timeout_secs,
            "backend configured"
        );

        let chat = ConversationOrchestrator::new(
            Arc::new(backend),
            template_source(&config.templates, &s3),
            document_source(&config.documents, &s3),
        )
        .with_document_cap(config.document_cap);

        Self {
            sessions: SessionStore::new(),
            chat,
            session_bucket: config
                .session_bucket
                .clone()
                .map(|bucket| (s3.clone(), bucket)),
        }
    }

    /// Save the session if a session bucket is configured. Failures are
    /// logged; the in-memory session stays authoritative.
    pub async fn persist(&self, session: &Session) {
        let Some((client, bucket)) = &self.session_bucket else {
            return;
        };
        if let Err(e) = sessions::save_session(client, bucket, session).await {
            warn!(session_id = %session.id(), error = %e, "failed to persist session");
        }
    }

    /// Load a saved session into the live store.
    pub async fn restore(&self, id: Uuid) -> eyre::Result<SessionHandle> {
        let (client, bucket) = self.session_bucket()?;
        let session = sessions::load_session(client, bucket, id)
            .await?
            .ok_or_else(|| eyre::eyre!("no saved session {id} in bucket {bucket}"))?;
        info!(
            session_id = %id,
            document_id = session.document_id().unwrap_or_default(),
            turns = session.chat_history().len(),
            "session restored"
        );
        Ok(self.sessions.insert(session).await)
    }

    /// Drop a session from the live store and delete its saved copy.
    pub async fn forget(&self, id: Uuid) -> eyre::Result<()> {
        self.sessions.discard(id).await;
        let (client, bucket) = self.session_bucket()?;
        sessions::delete_session(client, bucket, id).await?;
        info!(session_id = %id, "saved session deleted");
        Ok(())
    }

    fn session_bucket(&self) -> eyre::Result<(&aws_sdk_s3::Client, &str)> {
        self.session_bucket
            .as_ref()
            .map(|(client, bucket)| (client, bucket.as_str()))
            .ok_or_else(|| eyre::eyre!("session_bucket is not set in the configuration"))
    }
}

pub fn template_source(location: &Location, s3: &aws_sdk_s3::Client) -> Arc<dyn TemplateSource> {
    match location {
        Location::Directory { path } => Arc::new(DirTemplates::new(path)),
        Location::S3 { bucket } => Arc::new(S3Templates::new(s3.clone(), bucket.clone())),
    }
}

pub fn document_source(location: &Location, s3: &aws_sdk_s3::Client) -> Arc<dyn DocumentSource> {
    match location {
        Location::Directory { path } => Arc::new(DirDocuments::new(path)),
        Location::S3 { bucket } => Arc::new(S3Documents::new(s3.clone(), bucket.clone())),
    }
}
