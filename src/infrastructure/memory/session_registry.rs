//! In-Memory Session Registry Implementation

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::ports::{RegistryError, SessionRegistryPort, SharedSession};
use crate::application::token_tag;
use crate::domain::playlist::PlaylistSession;

/// 注册表条目
struct RegistryEntry {
    session: SharedSession,
    last_activity: DateTime<Utc>,
}

/// 内存会话注册表
pub struct InMemorySessionRegistry {
    sessions: DashMap<String, RegistryEntry>,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 空闲超时；超出 chrono 可表示的范围时视为永不过期
fn idle_timeout(secs: u64) -> Option<chrono::Duration> {
    i64::try_from(secs).ok().and_then(chrono::Duration::try_seconds)
}

impl SessionRegistryPort for InMemorySessionRegistry {
    fn get(&self, user: &str) -> Result<SharedSession, RegistryError> {
        self.find(user)
            .ok_or_else(|| RegistryError::NotFound(token_tag(user)))
    }

    fn find(&self, user: &str) -> Option<SharedSession> {
        self.sessions.get(user).map(|e| e.session.clone())
    }

    fn insert(&self, user: &str, session: PlaylistSession) -> SharedSession {
        let session_id = session.id();
        let shared = Arc::new(Mutex::new(session));
        let replaced = self
            .sessions
            .insert(
                user.to_string(),
                RegistryEntry {
                    session: shared.clone(),
                    last_activity: Utc::now(),
                },
            )
            .is_some();
        tracing::info!(
            user = %token_tag(user),
            session_id = %session_id,
            replaced,
            "Session registered"
        );
        shared
    }

    fn remove_if_idle(&self, user: &str, idle_timeout_secs: u64) -> bool {
        let Some(timeout) = idle_timeout(idle_timeout_secs) else {
            return false;
        };
        let now = Utc::now();
        let removed = self
            .sessions
            .remove_if(user, |_, entry| now - entry.last_activity > timeout)
            .is_some();
        if removed {
            tracing::info!(user = %token_tag(user), "Idle session removed");
        }
        removed
    }

    fn touch(&self, user: &str) {
        if let Some(mut entry) = self.sessions.get_mut(user) {
            entry.last_activity = Utc::now();
        }
    }

    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String> {
        let Some(timeout) = idle_timeout(idle_timeout_secs) else {
            return Vec::new();
        };
        let now = Utc::now();

        self.sessions
            .iter()
            .filter(|entry| now - entry.last_activity > timeout)
            .map(|entry| entry.key().clone())
            .collect()
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
