//! Process-wide conversation cache with per-session locking.
//!
//! Conversations live only for the lifetime of the process; this is a
//! non-durable cache, not a store of record. Each entry is guarded by its
//! own async lock so unrelated sessions never contend, and the idle sweep
//! can tell a mid-turn conversation apart from an abandoned one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use ccommon::SessionId;
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use crate::{ChatError, Conversation};

pub type SharedConversation = Arc<AsyncMutex<Conversation>>;

pub struct ConversationStore {
    system_prompt: String,
    sessions: Mutex<HashMap<SessionId, SharedConversation>>,
}

impl ConversationStore {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves a session id to its conversation, creating both lazily.
    ///
    /// An absent or unknown id is never an error: `None` mints a fresh
    /// UUIDv4 id, and an unrecognized id seeds a new conversation under
    /// that id.
    pub fn open(
        &self,
        session_id: Option<SessionId>,
    ) -> Result<(SessionId, SharedConversation), ChatError> {
        let session_id =
            session_id.unwrap_or_else(|| SessionId::new(Uuid::new_v4().to_string()));

        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| ChatError::store("conversation store lock poisoned"))?;

        let conversation = sessions
            .entry(session_id.clone())
            .or_insert_with(|| {
                tracing::debug!(
                    phase = "store",
                    event = "session_created",
                    session_id = %session_id,
                );
                Arc::new(AsyncMutex::new(Conversation::new(
                    session_id.clone(),
                    self.system_prompt.clone(),
                )))
            })
            .clone();

        Ok((session_id, conversation))
    }

    /// Looks up an existing conversation without creating one.
    pub fn get(&self, session_id: &SessionId) -> Result<Option<SharedConversation>, ChatError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| ChatError::store("conversation store lock poisoned"))?;

        Ok(sessions.get(session_id).cloned())
    }

    /// Removes a session outright; returns whether anything was removed.
    pub fn delete_session(&self, session_id: &SessionId) -> Result<bool, ChatError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| ChatError::store("conversation store lock poisoned"))?;

        Ok(sessions.remove(session_id).is_some())
    }

    /// Removes every conversation idle for at least `max_age`, measured
    /// from `updated_at`. Conversations whose lock is currently held are
    /// mid-turn and are always skipped. Returns the number removed.
    pub fn evict_stale(&self, max_age: Duration) -> Result<usize, ChatError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| ChatError::store("conversation store lock poisoned"))?;

        let now = SystemTime::now();
        let before = sessions.len();

        sessions.retain(|session_id, conversation| {
            let Ok(guard) = conversation.try_lock() else {
                return true;
            };

            let age = now.duration_since(guard.updated_at).unwrap_or_default();
            if age < max_age {
                return true;
            }

            tracing::debug!(
                phase = "store",
                event = "session_evicted",
                session_id = %session_id,
                idle_secs = age.as_secs(),
            );
            false
        });

        Ok(before - sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|sessions| sessions.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
