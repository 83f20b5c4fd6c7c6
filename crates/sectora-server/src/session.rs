use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use sectora_report::session::SessionState;

/// One session's state. Handlers hold the lock across their gateway calls,
/// so actions within a session run one at a time.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// In-memory store for analysis sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session and return its id.
    pub async fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.initialize(&id).await;
        id
    }

    /// Insert default state for `id` unless it already exists.
    pub async fn initialize(&self, id: &str) -> SharedSession {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SessionState::default())))
            .clone()
    }

    pub async fn get(&self, id: &str) -> Option<SharedSession> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }

    pub async fn delete(&self, id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id).is_some()
    }

    /// Clear every field of a session. Returns false for an unknown id.
    pub async fn reset_all(&self, id: &str) -> bool {
        match self.get(id).await {
            Some(session) => {
                session.lock().await.reset_all();
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
