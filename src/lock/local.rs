use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::{Duration, Instant},
};

use tracing::debug;

use crate::{
    error::lock::LockError,
    lock::{SingleFlightLock, DEFAULT_POLL_INTERVAL},
};

type LockMap = Arc<Mutex<HashMap<String, LockEntry>>>;

struct LockEntry {
    acquired_at: Instant,
    ttl: Duration,
    /// Identifies the acquisition, so a guard outliving its TTL cannot release a successor
    generation: u64,
}

impl LockEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.acquired_at) > self.ttl
    }
}

/// Lock the map; a poisoned map is still consistent since entries are inserted and
/// removed whole.
fn lock_map(locks: &LockMap) -> MutexGuard<'_, HashMap<String, LockEntry>> {
    locks.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-local lock registry.
///
/// Cloning yields a handle to the same registry. Every operation first purges entries
/// whose TTL has elapsed.
#[derive(Clone)]
pub struct LocalLockRegistry {
    locks: LockMap,
    next_generation: Arc<AtomicU64>,
    poll_interval: Duration,
}

/// Holder's side of a [`LocalLockRegistry`] acquisition; releases the key on drop.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LocalLockGuard {
    locks: LockMap,
    key: String,
    generation: u64,
}

impl LocalLockGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for LocalLockGuard {
    fn drop(&mut self) {
        let mut locks = lock_map(&self.locks);

        let owned = locks
            .get(&self.key)
            .is_some_and(|entry| entry.generation == self.generation);

        if owned {
            locks.remove(&self.key);
            debug!("Released lock {}", self.key);
        } else {
            debug!("Lock {} expired before release", self.key);
        }
    }
}

impl LocalLockRegistry {
    pub fn new() -> Self {
        Self::with_poll_interval(DEFAULT_POLL_INTERVAL)
    }

    /// Create a registry polling at `poll_interval` while waiting (useful for testing)
    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
            next_generation: Arc::new(AtomicU64::new(0)),
            poll_interval,
        }
    }

    /// Whether `key` is currently held by an unexpired holder.
    pub fn is_held(&self, key: &str) -> bool {
        self.purged().contains_key(key)
    }

    /// Number of unexpired locks.
    pub fn len(&self) -> usize {
        self.purged().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lock the map and drop expired entries.
    fn purged(&self) -> MutexGuard<'_, HashMap<String, LockEntry>> {
        let mut locks = lock_map(&self.locks);

        let now = Instant::now();
        let before = locks.len();
        locks.retain(|_, entry| !entry.is_expired(now));

        let expired = before - locks.len();
        if expired > 0 {
            debug!("Purged {} expired single-flight locks", expired);
        }

        locks
    }

    fn claim(&self, key: &str, ttl: Duration) -> Option<LocalLockGuard> {
        let mut locks = self.purged();

        if locks.contains_key(key) {
            return None;
        }

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        locks.insert(
            key.to_string(),
            LockEntry {
                acquired_at: Instant::now(),
                ttl,
                generation,
            },
        );

        Some(LocalLockGuard {
            locks: Arc::clone(&self.locks),
            key: key.to_string(),
            generation,
        })
    }
}

impl Default for LocalLockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleFlightLock for LocalLockRegistry {
    type Guard = LocalLockGuard;

    async fn try_acquire(
        &self,
        key: &str,
        ttl: Duration,
    ) -> Result<Option<LocalLockGuard>, LockError> {
        let guard = self.claim(key, ttl);

        debug!("Lock {} acquire attempt: {}", key, guard.is_some());

        Ok(guard)
    }

    async fn release(&self, guard: LocalLockGuard) -> Result<(), LockError> {
        drop(guard);

        Ok(())
    }

    async fn wait_for_release(&self, key: &str, timeout: Duration) -> Result<(), LockError> {
        let started = Instant::now();

        loop {
            if !self.is_held(key) {
                return Ok(());
            }

            let elapsed = started.elapsed();
            if elapsed >= timeout {
                return Err(LockError::WaitTimeout {
                    key: key.to_string(),
                    timeout,
                });
            }

            tokio::time::sleep(self.poll_interval.min(timeout - elapsed)).await;
        }
    }
}
