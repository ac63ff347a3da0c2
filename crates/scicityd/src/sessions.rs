//! In-memory session store with idle expiry.
//!
//! LRU-bounded map from session token to conversation state. A session
//! that sits idle past the TTL is treated as gone and the next contact
//! starts fresh at `Welcome`. Access is load/mutate/save per request;
//! concurrent requests for the same session race and the last write wins,
//! which is acceptable for human-paced conversation.

use crate::conversation::Session;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

/// Bounded session store with per-entry idle TTL.
pub struct SessionStore {
    cache: Mutex<LruCache<Uuid, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    /// * `capacity` - maximum number of live sessions
    /// * `ttl` - idle time after which a session is discarded
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Fetch the session for `id`, or a fresh `Welcome` session when the
    /// token is unknown or has expired.
    pub async fn load(&self, id: Uuid) -> Session {
        let mut cache = self.cache.lock().await;
        match cache.get(&id) {
            Some(entry) if entry.last_seen.elapsed() < self.ttl => entry.session.clone(),
            Some(_) => {
                cache.pop(&id);
                Session::new()
            }
            None => Session::new(),
        }
    }

    /// Write a session back, refreshing its idle clock.
    pub async fn save(&self, id: Uuid, session: Session) {
        let mut cache = self.cache.lock().await;
        cache.put(
            id,
            SessionEntry {
                session,
                last_seen: Instant::now(),
            },
        );
    }

    /// Drop the session entirely (used by reset before reissuing state).
    pub async fn remove(&self, id: Uuid) {
        let mut cache = self.cache.lock().await;
        cache.pop(&id);
    }

    /// Number of unexpired sessions. Prunes expired entries as it counts.
    pub async fn active_count(&self) -> usize {
        let mut cache = self.cache.lock().await;
        let expired: Vec<Uuid> = cache
            .iter()
            .filter(|(_, entry)| entry.last_seen.elapsed() >= self.ttl)
            .map(|(id, _)| *id)
            .collect();
        for id in expired {
            cache.pop(&id);
        }
        cache.len()
    }
}
