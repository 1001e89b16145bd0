//! Result cache
//!
//! TTL- and size-bounded memo of fused assessments keyed by normalized-text
//! fingerprint. Shared across concurrent requests behind a `parking_lot`
//! RwLock. Recomputing the same fingerprint twice during a race is
//! correctness-preserving, only wasteful, so lookups stay simple:
//! expiry-check-then-clone under the read lock, removal under the write
//! lock. Entries are never mutated after publish.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use super::types::{CacheStats, RiskAssessment};

struct CacheEntry {
    value: RiskAssessment,
    inserted_at: Instant,
}

pub struct ResultCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    capacity: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Fresh copy of the stored assessment, or None when absent/expired.
    pub fn get(&self, key: &str) -> Option<RiskAssessment> {
        {
            let entries = self.entries.read();
            if let Some(entry) = entries.get(key) {
                if entry.inserted_at.elapsed() < self.ttl {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
            }
        }

        // Expired or absent: drop a stale entry if one is still there.
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(key) {
            if entry.inserted_at.elapsed() >= self.ttl {
                entries.remove(key);
            } else {
                // A concurrent insert refreshed it between locks.
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entries[key].value.clone());
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Publish an assessment. At capacity, expired entries go first, then
    /// the oldest entry.
    pub fn insert(&self, key: String, value: RiskAssessment) {
        let mut entries = self.entries.write();

        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            entries.retain(|_, e| e.inserted_at.elapsed() < self.ttl);
        }
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            if let Some(oldest) = entries
                .iter()
                .max_by_key(|(_, e)| e.inserted_at.elapsed())
                .map(|(k, _)| k.clone())
            {
                entries.remove(&oldest);
            }
        }

        entries.insert(key, CacheEntry { value, inserted_at: Instant::now() });
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.read().len(),
            capacity: self.capacity,
            ttl_secs: self.ttl.as_secs(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
