//! Ephemeral one-time-download store.
//!
//! Entries move `absent → live → {consumed, expired}`; both terminal
//! states look identical to lookups. The expiry check and the removal
//! happen inside one critical section, so for any id at most one
//! caller ever receives the archive; a pass is a credential-like
//! artifact and must not be handed out twice.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default entry lifetime.
pub const SHARE_TTL: Duration = Duration::from_secs(10 * 60);

/// Recommended interval for the background sweep.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

struct ShareEntry {
    archive: Vec<u8>,
    title: String,
    expires_at: Instant,
}

/// In-memory map from share id to a pending one-time download.
///
/// Ids are minted by the caller; the store never generates them.
pub struct ShareStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, ShareEntry>>,
}

impl Default for ShareStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareStore {
    pub fn new() -> Self {
        Self::with_ttl(SHARE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Insert a live entry expiring `ttl` from now. Entries are never
    /// updated in place; reusing an id replaces the old entry.
    pub fn put(&self, id: impl Into<String>, archive: Vec<u8>, title: impl Into<String>) {
        let entry = ShareEntry {
            archive,
            title: title.into(),
            expires_at: Instant::now() + self.ttl,
        };
        self.entries
            .lock()
            .expect("share store lock poisoned")
            .insert(id.into(), entry);
    }

    /// Atomically remove and return a live entry. Expired entries are
    /// dropped here as well, so an unswept expired id is still
    /// unreachable.
    pub fn take(&self, id: &str) -> Option<(Vec<u8>, String)> {
        let mut entries = self.entries.lock().expect("share store lock poisoned");
        let entry = entries.remove(id)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some((entry.archive, entry.title))
    }

    /// Drop every expired entry; returns how many were removed.
    /// Bounds memory growth from generations nobody ever downloads.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("share store lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("share store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn first_take_wins_and_later_takes_miss() {
        let store = ShareStore::new();
        store.put("abc", vec![1, 2, 3], "My Pass");

        let (archive, title) = store.take("abc").expect("first take returns the entry");
        assert_eq!(archive, vec![1, 2, 3]);
        assert_eq!(title, "My Pass");

        assert!(store.take("abc").is_none());
        assert!(store.take("abc").is_none());
    }

    #[test]
    fn unknown_id_misses() {
        let store = ShareStore::new();
        assert!(store.take("never-stored").is_none());
    }

    #[test]
    fn expired_entry_is_unreachable_even_before_sweep() {
        let store = ShareStore::with_ttl(Duration::ZERO);
        store.put("gone", vec![1], "Expired");
        assert!(store.take("gone").is_none());
    }

    #[test]
    fn sweep_removes_only_expired_entries() {
        let expired = ShareStore::with_ttl(Duration::ZERO);
        expired.put("a", vec![1], "a");
        expired.put("b", vec![2], "b");
        assert_eq!(expired.sweep(), 2);
        assert!(expired.is_empty());

        let live = ShareStore::new();
        live.put("c", vec![3], "c");
        assert_eq!(live.sweep(), 0);
        assert_eq!(live.len(), 1);
    }

    #[test]
    fn concurrent_takes_deliver_at_most_once() {
        let store = Arc::new(ShareStore::new());
        store.put("contested", vec![42], "Race");

        let winners = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                let winners = Arc::clone(&winners);
                thread::spawn(move || {
                    if store.take("contested").is_some() {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reused_id_replaces_the_old_entry() {
        let store = ShareStore::new();
        store.put("id", vec![1], "old");
        store.put("id", vec![2], "new");
        let (archive, title) = store.take("id").unwrap();
        assert_eq!(archive, vec![2]);
        assert_eq!(title, "new");
    }
}
