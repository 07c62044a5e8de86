//! In-process draft cache
//!
//! Process-wide state with explicit invalidation. The clock is injected so
//! expiry is testable without sleeping.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Time source for expiry decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A stored blog draft
#[derive(Debug, Clone, serde::Serialize)]
pub struct Draft {
    pub id: String,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

struct Entry {
    draft: Draft,
    expires_at: DateTime<Utc>,
}

/// TTL cache of drafts keyed by id
pub struct DraftCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    inner: Mutex<HashMap<String, Entry>>,
}

impl DraftCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            inner: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store a draft, resetting its TTL
    pub fn put(&self, id: &str, title: &str, content: &str) -> Draft {
        let now = self.clock.now();
        let draft = Draft {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            updated_at: now,
        };
        self.lock().insert(
            id.to_string(),
            Entry {
                draft: draft.clone(),
                expires_at: now + self.ttl,
            },
        );
        draft
    }

    /// Fetch a draft; expired entries are dropped on read
    pub fn get(&self, id: &str) -> Option<Draft> {
        let now = self.clock.now();
        let mut inner = self.lock();
        match inner.get(id) {
            Some(entry) if entry.expires_at > now => Some(entry.draft.clone()),
            Some(_) => {
                inner.remove(id);
                None
            }
            None => None,
        }
    }

    /// All live drafts, most recently updated first
    pub fn list(&self) -> Vec<Draft> {
        let now = self.clock.now();
        let mut inner = self.lock();
        inner.retain(|_, entry| entry.expires_at > now);
        let mut drafts: Vec<Draft> = inner.values().map(|e| e.draft.clone()).collect();
        drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        drafts
    }

    /// Drop a draft regardless of expiry; true when something was removed
    pub fn invalidate(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clock that only moves when told to
    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn starting_at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self { now: Mutex::new(now) })
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn cache_with_clock() -> (DraftCache, Arc<ManualClock>) {
        let clock = ManualClock::starting_at(Utc::now());
        let cache = DraftCache::new(Duration::minutes(30), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_put_then_get() {
        let (cache, _clock) = cache_with_clock();
        cache.put("a", "Title", "Body");

        let draft = cache.get("a").unwrap();
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.content, "Body");
    }

    #[test]
    fn test_expired_entry_is_gone() {
        let (cache, clock) = cache_with_clock();
        cache.put("a", "Title", "Body");

        clock.advance(Duration::minutes(31));
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_put_resets_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.put("a", "Title", "v1");

        clock.advance(Duration::minutes(20));
        cache.put("a", "Title", "v2");

        clock.advance(Duration::minutes(20));
        // 40 minutes after the first put, 20 after the second
        assert_eq!(cache.get("a").unwrap().content, "v2");
    }

    #[test]
    fn test_invalidate_removes_live_entry() {
        let (cache, _clock) = cache_with_clock();
        cache.put("a", "Title", "Body");

        assert!(cache.invalidate("a"));
        assert!(cache.get("a").is_none());
        assert!(!cache.invalidate("a"));
    }

    #[test]
    fn test_list_skips_expired() {
        let (cache, clock) = cache_with_clock();
        cache.put("old", "Old", "Body");
        clock.advance(Duration::minutes(20));
        cache.put("new", "New", "Body");
        clock.advance(Duration::minutes(15));

        let drafts = cache.list();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, "new");
    }
}
