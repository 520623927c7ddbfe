//! Prompt template lookup.
//!
//! Templates are plain text files named after their [`TemplateRole`]
//! (`prompt_template.txt`, `prompt_answer.txt`, `prompt_question.txt`),
//! read fresh on every call so edits take effect without a restart.

use std::path::PathBuf;

use tracing::debug;
use verdict_core::keys;
use verdict_core::models::template::TemplateRole;

use crate::error::StorageError;
use crate::{objects, BoxFuture};

/// A source of prompt templates. A missing template is
/// [`StorageError::NotFound`].
pub trait TemplateSource: Send + Sync {
    fn load(&self, role: TemplateRole) -> BoxFuture<'_, Result<String, StorageError>>;
}

/// Templates stored as files in one directory.
#[derive(Debug, Clone)]
pub struct DirTemplates {
    dir: PathBuf,
}

impl DirTemplates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, role: TemplateRole) -> PathBuf {
        self.dir.join(role.file_name())
    }
}

impl TemplateSource for DirTemplates {
    fn load(&self, role: TemplateRole) -> BoxFuture<'_, Result<String, StorageError>> {
        Box::pin(async move {
            let path = self.path(role);
            debug!(%role, path = %path.display(), "loading template");
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => Ok(text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound {
                    key: path.display().to_string(),
                }),
                Err(source) => Err(StorageError::Io {
                    path: path.display().to_string(),
                    source,
                }),
            }
        })
    }
}

/// Templates stored under `templates/` in an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Templates {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Templates {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

impl TemplateSource for S3Templates {
    fn load(&self, role: TemplateRole) -> BoxFuture<'_, Result<String, StorageError>> {
        Box::pin(async move {
            let key = keys::template(role);
            debug!(%role, bucket = %self.bucket, key = %key, "loading template");
            objects::get_text(&self.client, &self.bucket, &key).await
        })
    }
}
