use std::{num::NonZeroUsize, sync::Mutex, time::Duration};

use lru::LruCache;
use tokio::time::Instant;

/// Key prefix for the rendered home feed.
pub const INDEX_PAGE: &str = "index_page";

/// A keyed store of rendered page fragments with per-entry expiry.
pub trait PageCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String, ttl: Duration);
    /// Returns whether a live entry was removed.
    fn delete(&self, key: &str) -> bool;
    fn clear(&self);
}

pub fn key(prefix: &str, page: i64) -> String {
    format!("{prefix}:page={page}")
}

struct Entry {
    value: String,
    expires_at: Instant,
}

pub struct LruPageCache {
    entries: Mutex<LruCache<String, Entry>>,
}

impl LruPageCache {
    pub fn new(capacity: NonZeroUsize) -> LruPageCache {
        LruPageCache {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, LruCache<String, Entry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PageCache for LruPageCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries();
        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    fn set(&self, key: &str, value: String, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries().put(key.to_owned(), Entry { value, expires_at });
    }

    fn delete(&self, key: &str) -> bool {
        self.entries()
            .pop(key)
            .is_some_and(|entry| entry.expires_at > Instant::now())
    }

    fn clear(&self) {
        self.entries().clear();
    }
}
