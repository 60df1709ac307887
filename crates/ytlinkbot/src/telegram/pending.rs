use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of links remembered for the button flow
pub const DEFAULT_CAPACITY: usize = 1000;

/// URLs waiting for the user to press Video or Audio.
///
/// Keys are handed out in increasing order; once more than `capacity`
/// links are stored, the oldest ones are dropped and their buttons answer
/// with "link expired".
pub struct PendingLinks {
    next_key: AtomicU64,
    links: DashMap<u64, String>,
    capacity: usize,
}

impl PendingLinks {
    pub fn new(capacity: usize) -> Self {
        Self {
            next_key: AtomicU64::new(1),
            links: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Stores `url` and returns its key
    pub fn insert(&self, url: impl Into<String>) -> u64 {
        let key = self.next_key.fetch_add(1, Ordering::Relaxed);
        self.links.insert(key, url.into());

        if self.links.len() > self.capacity {
            let oldest_kept = key.saturating_sub(self.capacity as u64 - 1);
            self.links.retain(|k, _| *k >= oldest_kept);
        }
        key
    }

    /// Removes and returns the URL stored under `key`
    pub fn take(&self, key: u64) -> Option<String> {
        self.links.remove(&key).map(|(_, url)| url)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Default for PendingLinks {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
