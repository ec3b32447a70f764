//! Application state and the in-memory session store.

use chrono::{DateTime, Duration, Utc};
use drive_core::google::oauth::OAuthClient;
use drive_core::{CoreConfig, Credential, DriveBackend};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// How long a login may stay between `/login` and `/callback`.
pub const PENDING_LOGIN_TTL_MINUTES: i64 = 10;

/// Lifetime of any session, logged in or not.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Upper bound on pending logins; the oldest are dropped first.
pub const MAX_PENDING_SESSIONS: usize = 1024;

/// One browser session. `oauth_state` is set between `/login` and `/callback`.
#[derive(Clone, Debug)]
pub struct Session {
    pub oauth_state: Option<String>,
    pub credential: Option<Credential>,
    pub created_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            oauth_state: None,
            credential: None,
            created_at: Utc::now(),
        }
    }
}

impl Session {
    /// A session waiting for the provider to call back with `oauth_state`.
    pub fn pending(oauth_state: impl Into<String>) -> Self {
        Self {
            oauth_state: Some(oauth_state.into()),
            ..Self::default()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.credential.is_none()
    }

    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        let age = now - self.created_at;
        age > Duration::hours(SESSION_TTL_HOURS)
            || (self.is_pending() && age > Duration::minutes(PENDING_LOGIN_TTL_MINUTES))
    }
}

/// Sessions keyed by the id stored in the session cookie. Nothing is persisted.
///
/// Stale sessions are evicted whenever a new one is created.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `session` under a fresh random id and returns the id.
    pub async fn create(&self, session: Session) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let mut sessions = self.inner.write().await;
        prune(&mut sessions, Utc::now());
        sessions.insert(id.clone(), session);
        id
    }

    pub async fn insert(&self, id: impl Into<String>, session: Session) {
        self.inner.write().await.insert(id.into(), session);
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        self.inner.read().await.get(id).cloned()
    }

    /// Removes and returns the pending login state of a session.
    pub async fn take_oauth_state(&self, id: &str) -> Option<String> {
        self.inner
            .write()
            .await
            .get_mut(id)
            .and_then(|s| s.oauth_state.take())
    }

    /// Replaces the session's credential, creating the session if it has gone.
    pub async fn set_credential(&self, id: &str, credential: Credential) {
        self.inner
            .write()
            .await
            .entry(id.to_string())
            .or_default()
            .credential = Some(credential);
    }

    /// Drops the session if it never completed a login.
    pub async fn discard_pending(&self, id: &str) {
        let mut sessions = self.inner.write().await;
        if sessions.get(id).is_some_and(Session::is_pending) {
            sessions.remove(id);
        }
    }

    pub async fn remove(&self, id: &str) -> Option<Session> {
        self.inner.write().await.remove(id)
    }

    /// Evicts sessions that are stale at `now`.
    pub async fn prune(&self, now: DateTime<Utc>) {
        prune(&mut *self.inner.write().await, now);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Drops stale sessions, then the oldest pending ones beyond [`MAX_PENDING_SESSIONS`] (leaving
/// room for one more).
fn prune(sessions: &mut HashMap<String, Session>, now: DateTime<Utc>) {
    let before = sessions.len();
    sessions.retain(|_, s| !s.is_stale(now));

    let mut pending: Vec<(DateTime<Utc>, String)> = sessions
        .iter()
        .filter(|(_, s)| s.is_pending())
        .map(|(id, s)| (s.created_at, id.clone()))
        .collect();
    if pending.len() >= MAX_PENDING_SESSIONS {
        pending.sort();
        let excess = pending.len() + 1 - MAX_PENDING_SESSIONS;
        for (_, id) in pending.into_iter().take(excess) {
            sessions.remove(&id);
        }
    }

    let evicted = before - sessions.len();
    if evicted > 0 {
        tracing::debug!(evicted, remaining = sessions.len(), "pruned sessions");
    }
}

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub sessions: SessionStore,
    pub backend: Arc<dyn DriveBackend>,
    /// `None` when no client secrets were found at startup; login is then unavailable.
    pub oauth: Option<Arc<OAuthClient>>,
}

impl AppState {
    pub fn new(
        cfg: Arc<CoreConfig>,
        backend: Arc<dyn DriveBackend>,
        oauth: Option<Arc<OAuthClient>>,
    ) -> Self {
        Self {
            cfg,
            sessions: SessionStore::new(),
            backend,
            oauth,
        }
    }
}
