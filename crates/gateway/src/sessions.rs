//! In-memory session tracking for multi-turn conversations.
//!
//! Sessions live for the lifetime of the process and are never persisted.
//! The map is bounded: once `MAX_SESSIONS` is reached, the oldest session
//! is evicted to make room for a new one.

use askhound_core::HistoryEntry;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Maximum number of live sessions before the oldest is evicted.
const MAX_SESSIONS: usize = 1_000;

/// A single conversation session.
#[derive(Debug, Clone)]
pub struct Session {
    pub history: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Self {
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Process-wide session map, keyed by session id.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a session id: reuse the caller's id (creating the session if
    /// unseen) or generate a fresh UUID.
    pub async fn resolve(&self, requested: Option<String>) -> String {
        let id = match requested {
            Some(id) if !id.is_empty() => id,
            _ => uuid::Uuid::new_v4().to_string(),
        };

        let mut sessions = self.sessions.write().await;

        if !sessions.contains_key(&id) {
            // Evict oldest session if at capacity
            if sessions.len() >= MAX_SESSIONS {
                if let Some(oldest_key) = sessions
                    .iter()
                    .min_by_key(|(_, s)| s.created_at)
                    .map(|(k, _)| k.clone())
                {
                    sessions.remove(&oldest_key);
                }
            }
            sessions.insert(id.clone(), Session::new());
        }

        id
    }

    /// Full history for a session, oldest exchange first.
    ///
    /// Unknown ids yield an empty history rather than an error.
    pub async fn history(&self, id: &str) -> Vec<HistoryEntry> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .map(|s| s.history.clone())
            .unwrap_or_default()
    }

    /// Record one completed exchange for a session.
    pub async fn append(&self, id: &str, entry: HistoryEntry) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id.to_string())
            .or_insert_with(Session::new)
            .history
            .push(entry);
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
