use chrono::Utc;
use list_store::ListStore;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

use crate::flash::Flash;

/// Everything one browser session owns.
#[derive(Debug, Default)]
pub struct UserSession {
    pub lists: ListStore,
    pub flash: Flash,
}

#[derive(Debug)]
struct SessionEntry {
    state: Mutex<UserSession>,
    /// Unix seconds of the last request that used this session.
    last_seen: AtomicI64,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            state: Mutex::new(UserSession::default()),
            last_seen: AtomicI64::new(Utc::now().timestamp()),
        }
    }

    fn touch(&self) {
        self.last_seen.store(Utc::now().timestamp(), Ordering::Relaxed);
    }
}

/// Handle to one session, placed in request extensions by the middleware.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    entry: Arc<SessionEntry>,
}

impl Session {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Lock the session state for the rest of the handler.
    pub async fn lock(&self) -> MutexGuard<'_, UserSession> {
        self.entry.state.lock().await
    }
}

/// In-memory session registry shared by all workers.
///
/// Holds at most `capacity` sessions; when full, the least recently used one
/// is dropped to make room.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<LruCache<Uuid, Arc<SessionEntry>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(capacity: NonZeroUsize, idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
            idle_timeout,
        }
    }

    /// Look up the session named by the request cookie, or start a new one.
    ///
    /// The flag is true when a new session was created and the caller has to
    /// hand its id back to the browser. A known id whose session sat idle past
    /// the timeout counts as unknown.
    pub async fn resolve(&self, requested: Option<Uuid>) -> (Session, bool) {
        let mut sessions = self.sessions.lock().await;
        let now = Utc::now().timestamp();

        if let Some(id) = requested {
            let live = sessions
                .get(&id)
                .filter(|entry| !self.is_idle(entry, now))
                .map(Arc::clone);
            if let Some(entry) = live {
                entry.touch();
                return (Session { id, entry }, false);
            }
            if sessions.pop(&id).is_some() {
                debug!(session_id = %id, "session expired, starting a new session");
            } else {
                debug!(session_id = %id, "unknown session id, starting a new session");
            }
        }

        self.evict_idle(&mut sessions, now);

        let id = Uuid::new_v4();
        let entry = Arc::new(SessionEntry::new());
        if let Some((evicted, _)) = sessions.push(id, Arc::clone(&entry)) {
            info!(session_id = %evicted, "session store full, dropped least recently used session");
        }
        debug!(session_id = %id, active = sessions.len(), "session created");
        (Session { id, entry }, true)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn is_idle(&self, entry: &SessionEntry, now: i64) -> bool {
        let limit = i64::try_from(self.idle_timeout.as_secs()).unwrap_or(i64::MAX);
        now - entry.last_seen.load(Ordering::Relaxed) >= limit
    }

    /// Drop idle sessions from the cold end of the cache. Recency order
    /// follows `last_seen`, so the scan stops at the first live session.
    fn evict_idle(&self, sessions: &mut LruCache<Uuid, Arc<SessionEntry>>, now: i64) {
        let mut evicted = 0usize;
        while let Some((_, entry)) = sessions.peek_lru() {
            if !self.is_idle(entry, now) {
                break;
            }
            sessions.pop_lru();
            evicted += 1;
        }
        if evicted > 0 {
            info!(evicted, "evicted idle sessions");
        }
    }
}
