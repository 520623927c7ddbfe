//! Uploaded document lookup by identifier.
//!
//! A document that does not exist is an expected outcome (`Ok(None)`), not
//! an error. Errors are reserved for I/O and transport failures.

use std::path::{Component, Path, PathBuf};

use tracing::debug;
use verdict_core::keys;

use crate::error::StorageError;
use crate::{objects, BoxFuture};

pub trait DocumentSource: Send + Sync {
    fn fetch<'a>(&'a self, document_id: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>>;
}

/// Documents stored as UTF-8 files in one directory, keyed by file name.
#[derive(Debug, Clone)]
pub struct DirDocuments {
    dir: PathBuf,
}

impl DirDocuments {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve `document_id` to a path inside the directory. Ids that would
    /// escape it (`..`, absolute paths, nested paths) resolve to nothing.
    pub fn path(&self, document_id: &str) -> Option<PathBuf> {
        let mut components = Path::new(document_id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(self.dir.join(name)),
            _ => None,
        }
    }
}

impl DocumentSource for DirDocuments {
    fn fetch<'a>(&'a self, document_id: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move {
            let Some(path) = self.path(document_id) else {
                debug!(document_id, "rejecting document id outside the document directory");
                return Ok(None);
            };
            match tokio::fs::read(&path).await {
                Ok(bytes) => String::from_utf8(bytes)
                    .map(Some)
                    .map_err(|_| StorageError::InvalidUtf8 {
                        key: path.display().to_string(),
                    }),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(source) => Err(StorageError::Io {
                    path: path.display().to_string(),
                    source,
                }),
            }
        })
    }
}

/// Documents stored under `documents/` in an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Documents {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Documents {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

impl DocumentSource for S3Documents {
    fn fetch<'a>(&'a self, document_id: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move {
            let key = keys::document(document_id);
            match objects::get_text(&self.client, &self.bucket, &key).await {
                Ok(text) => Ok(Some(text)),
                Err(e) if e.is_not_found() => Ok(None),
                Err(e) => Err(e),
            }
        })
    }
}
