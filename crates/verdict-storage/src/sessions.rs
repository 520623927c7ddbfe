//! In-process session store and S3 session persistence.
//!
//! Each session sits behind its own `tokio::sync::Mutex`. Callers hold that
//! lock for the whole of a request (analysis or question), which serializes
//! concurrent requests against one session while leaving other sessions
//! untouched. The map itself is behind an `RwLock` that is only held long
//! enough to look up, insert or remove a handle.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;
use verdict_core::keys;
use verdict_core::models::session::Session;

use crate::error::StorageError;
use crate::{objects, state};

/// Shared handle to one session. Lock it for the duration of a request.
pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session and return its id and handle.
    pub async fn create(&self) -> (Uuid, SessionHandle) {
        let session = Session::new();
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        debug!(session_id = %id, "session created");
        (id, handle)
    }

    /// Insert a session restored from elsewhere, replacing any live session
    /// with the same id.
    pub async fn insert(&self, session: Session) -> SessionHandle {
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        handle
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drop a session. Returns whether it existed.
    pub async fn discard(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            debug!(session_id = %id, "session discarded");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Discard every session idle for longer than `max_idle`. Sessions that
    /// are locked by an in-flight request are not idle and are kept.
    /// Returns the number discarded.
    pub async fn expire_idle(&self, max_idle: jiff::SignedDuration) -> usize {
        let now = jiff::Timestamp::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => now.duration_since(session.updated_at()) <= max_idle,
            Err(_) => true,
        });
        let expired = before - sessions.len();
        if expired > 0 {
            info!(expired, remaining = sessions.len(), "expired idle sessions");
        }
        expired
    }
}

/// Persist a session as JSON at `sessions/<id>.json`.
pub async fn save_session(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    session: &Session,
) -> Result<(), StorageError> {
    let key = keys::session(session.id());
    state::save_state(client, bucket, &key, session).await?;
    debug!(session_id = %session.id(), turns = session.chat_history().len(), "session saved");
    Ok(())
}

/// Load a persisted session. A missing object is `Ok(None)`.
pub async fn load_session(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    id: Uuid,
) -> Result<Option<Session>, StorageError> {
    match state::load_state::<Session>(client, bucket, &keys::session(id)).await {
        Ok(session) => Ok(Some(session)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Delete a persisted session.
pub async fn delete_session(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    id: Uuid,
) -> Result<(), StorageError> {
    objects::delete_object(client, bucket, &keys::session(id)).await?;
    debug!(session_id = %id, "persisted session deleted");
    Ok(())
}
