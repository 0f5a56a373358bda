use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CachedBody {
    body: String,
    stored_at: Instant,
}

/// Bounded response-body cache keyed by full request URI.
///
/// Entries are served until `ttl` has passed since they were stored, then
/// dropped on the next lookup. Read-through only: nothing invalidates an entry
/// early, and two concurrent misses for the same key both go to the network.
pub struct ResponseCache {
    ttl: Duration,
    memory: Mutex<LruCache<String, CachedBody>>,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            ttl,
            memory: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh body for `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut memory = self.lock();
        let entry = memory.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            return Some(entry.body.clone());
        }
        memory.pop(key);
        None
    }

    pub fn put(&self, key: String, body: String) {
        self.lock().put(
            key,
            CachedBody {
                body,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResponseCache {
    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, CachedBody>> {
        match self.memory.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
