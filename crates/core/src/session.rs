//! In-memory administrator sessions.
//!
//! A session is created by a successful login and lives until it is
//! destroyed by logout or until it is older than the configured timeout.
//! Expiry is lazy: [`SessionManager::validate`] removes an expired session
//! when it sees one, and [`SessionManager::create`] sweeps all expired
//! sessions before recording the new one. There is no background timer.
//!
//! Nothing is persisted; a process restart logs everybody out.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::types::Timestamp;

/// Default session lifetime in minutes.
pub const DEFAULT_SESSION_TIMEOUT_MINS: i64 = 30;

/// Server-side record of one successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub created_at: Timestamp,
    /// Always `true` while the session is present in the registry.
    pub logged_in: bool,
}

/// Registry of active sessions keyed by their opaque token.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Session>>,
    timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionManager {
    /// Create an empty registry using wall-clock time.
    pub fn new(timeout: Duration) -> Self {
        Self::with_clock(timeout, Arc::new(SystemClock))
    }

    /// Create an empty registry with an explicit time source.
    pub fn with_clock(timeout: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            timeout,
            clock,
        }
    }

    /// Configured session lifetime.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start a new session and return its token.
    ///
    /// Expired sessions are purged first.
    pub async fn create(&self) -> String {
        let now = self.clock.now();
        let token = Uuid::new_v4().to_string();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !self.is_expired(s, now));
        sessions.insert(
            token.clone(),
            Session {
                created_at: now,
                logged_in: true,
            },
        );

        tracing::debug!(active = sessions.len(), "Session created");
        token
    }

    /// Check whether `token` names a live session.
    ///
    /// An expired session is removed as a side effect. An unknown token is
    /// simply rejected.
    pub async fn validate(&self, token: &str) -> bool {
        let now = self.clock.now();

        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return false,
                Some(s) if !self.is_expired(s, now) => return s.logged_in,
                Some(_) => {}
            }
        }

        // Expired: re-check under the write lock, the session may have been
        // removed or replaced while no lock was held.
        let mut sessions = self.sessions.write().await;
        if sessions
            .get(token)
            .is_some_and(|s| self.is_expired(s, now))
        {
            sessions.remove(token);
            tracing::debug!("Expired session removed on validation");
        }
        false
    }

    /// End a session. Unknown tokens are ignored.
    pub async fn destroy(&self, token: &str) {
        if self.sessions.write().await.remove(token).is_some() {
            tracing::debug!("Session destroyed");
        }
    }

    /// Remove every expired session and return how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !self.is_expired(s, now));
        before - sessions.len()
    }

    /// Number of sessions currently held, expired or not.
    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn is_expired(&self, session: &Session, now: Timestamp) -> bool {
        now - session.created_at > self.timeout
    }
}
