//! In-Memory Session Registry
//!
//! Open sessions live in process memory; restarting the server closes them.
//! With an idle TTL set, sessions unused for that long are dropped on the
//! next `insert` or `get`. Sessions busy with a request are never dropped.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::domain::foundation::SessionId;
use crate::domain::session::StockSession;
use crate::ports::{SessionRegistry, SharedSession};

/// In-memory registry of open sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, SharedSession>>>,
    idle_ttl: Option<Duration>,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop sessions nobody has used for `ttl`.
    pub fn with_idle_ttl(mut self, ttl: Duration) -> Self {
        self.idle_ttl = Some(ttl);
        self
    }

    /// Remove sessions idle at `now`. Returns how many were removed.
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let Some(ttl) = self.idle_ttl else {
            return 0;
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, shared| match shared.try_lock() {
            Ok(session) => !session.is_idle(now, ttl),
            Err(_) => true,
        });
        let evicted = before - sessions.len();

        if evicted > 0 {
            info!(evicted, open = sessions.len(), "Evicted idle stock sessions");
        }
        evicted
    }

    /// Close every session (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn insert(&self, session: StockSession) -> SharedSession {
        self.evict_idle(Utc::now()).await;
        let id = *session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&shared));
        shared
    }

    async fn get(&self, id: &SessionId) -> Option<SharedSession> {
        let now = Utc::now();
        self.evict_idle(now).await;
        let shared = self.sessions.read().await.get(id).cloned()?;
        shared.lock().await.touch(now);
        Some(shared)
    }

    async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
