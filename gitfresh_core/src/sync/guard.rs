//! Opt-in serialization of search-then-create windows
//!
//! Two concurrent syncs for the same unresolved company name (or contact
//! email) can both observe "no match" and both create a record. The
//! directory offers no idempotency key, so by default nothing prevents
//! that. [`CreationGuard`] narrows the window for invocations that share one
//! guard inside one process; it does nothing across processes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slot = Arc<AsyncMutex<()>>;

/// Keyed async lock over `(tenant, key)` pairs
#[derive(Debug, Default)]
pub struct CreationGuard {
    slots: Mutex<HashMap<(String, String), Slot>>,
}

impl CreationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key` within `tenant`
    ///
    /// The returned permit releases the key when dropped.
    pub async fn acquire(&self, tenant: &str, key: &str) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            // Idle slots are only referenced by the map.
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            slots
                .entry((tenant.to_string(), key.to_string()))
                .or_default()
                .clone()
        };
        slot.lock_owned().await
    }

    /// Number of keys currently held or awaited
    pub fn active_keys(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots
            .values()
            .filter(|slot| Arc::strong_count(slot) > 1)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let guard = Arc::new(CreationGuard::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let guard = guard.clone();
            let inside = inside.clone();
            let max_inside = max_inside.clone();
            handles.push(tokio::spawn(async move {
                let _permit = guard.acquire("acme", "company:Acme").await;
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_inside.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_block() {
        let guard = CreationGuard::new();
        let _a = guard.acquire("acme", "company:Acme").await;
        let _b = guard.acquire("acme", "company:Globex").await;
        let _c = guard.acquire("other", "company:Acme").await;
        assert_eq!(guard.active_keys(), 3);
    }

    #[tokio::test]
    async fn test_released_keys_are_pruned() {
        let guard = CreationGuard::new();
        {
            let _permit = guard.acquire("acme", "contact:a@example.com").await;
            assert_eq!(guard.active_keys(), 1);
        }
        assert_eq!(guard.active_keys(), 0);
        let _permit = guard.acquire("acme", "contact:b@example.com").await;
        assert_eq!(guard.slots.lock().unwrap().len(), 1);
    }
}
