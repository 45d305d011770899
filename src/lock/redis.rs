//! Redis/valkey-backed single-flight locks.
//!
//! Each acquire stores a fresh token under the key with `SET NX PX`, so the TTL is enforced
//! by the server. The token travels in the returned [`RedisLockGuard`], and release deletes
//! the key only if it still holds that token, so a holder whose lock already expired cannot
//! release someone else's lock.

mod lua;

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use chrono::Utc;
use fred::{
    prelude::*,
    types::{Expiration, SetOptions},
};
use tracing::debug;

use lua::RELEASE_LOCK_SCRIPT;

use crate::{
    error::lock::LockError,
    lock::{SingleFlightLock, DEFAULT_POLL_INTERVAL},
};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

/// Lock registry shared by every instance connected to the same redis.
#[derive(Clone)]
pub struct RedisLockRegistry {
    pool: Pool,
    /// Prefix applied to every key (allows namespacing for test isolation)
    namespace: String,
    poll_interval: Duration,
}

/// Holder's side of a [`RedisLockRegistry`] acquisition.
///
/// Dropped without [`SingleFlightLock::release`], the guard spawns the compare-and-delete on
/// the current tokio runtime. Outside a runtime the key is left to its TTL.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct RedisLockGuard {
    pool: Pool,
    key: String,
    redis_key: String,
    token: String,
    released: bool,
}

impl RedisLockGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Delete `redis_key` if it still holds `token`
async fn release_token(pool: &Pool, redis_key: String, token: String) -> Result<bool, LockError> {
    let removed: i64 = pool
        .eval(RELEASE_LOCK_SCRIPT, vec![redis_key], vec![token])
        .await?;

    Ok(removed > 0)
}

impl Drop for RedisLockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No runtime to release redis lock {}, leaving it to expire", self.key);
            return;
        };

        let pool = self.pool.clone();
        let key = std::mem::take(&mut self.key);
        let redis_key = std::mem::take(&mut self.redis_key);
        let token = std::mem::take(&mut self.token);

        handle.spawn(async move {
            match release_token(&pool, redis_key, token).await {
                Ok(true) => debug!("Released dropped redis lock {}", key),
                Ok(false) => debug!("Dropped redis lock {} had already expired", key),
                Err(e) => tracing::warn!("Failed to release dropped redis lock {}: {}", key, e),
            }
        });
    }
}

impl RedisLockRegistry {
    pub fn new(pool: Pool) -> Self {
        Self::with_namespace(pool, String::new())
    }

    /// Create a registry whose keys are prefixed with `namespace`
    pub fn with_namespace(pool: Pool, namespace: String) -> Self {
        Self {
            pool,
            namespace,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    fn redis_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    fn new_token() -> String {
        format!(
            "{}:{}:{}",
            std::process::id(),
            Utc::now().timestamp_micros(),
            NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)
        )
    }

    async fn is_held(&self, key: &str) -> Result<bool, LockError> {
        let exists: i64 = self.pool.exists(self.redis_key(key)).await?;

        Ok(exists > 0)
    }
}

impl SingleFlightLock for RedisLockRegistry {
    type Guard = RedisLockGuard;

    async fn try_acquire(
        &self,
        key: &str,
        ttl: Duration,
    ) -> Result<Option<RedisLockGuard>, LockError> {
        let redis_key = self.redis_key(key);
        let token = Self::new_token();

        let result: Option<String> = self
            .pool
            .set(
                redis_key.as_str(),
                token.as_str(),
                Some(Expiration::PX(ttl.as_millis() as i64)),
                Some(SetOptions::NX),
                false,
            )
            .await?;

        debug!("Redis lock {} acquire attempt: {}", key, result.is_some());

        Ok(result.map(|_| RedisLockGuard {
            pool: self.pool.clone(),
            key: key.to_string(),
            redis_key,
            token,
            released: false,
        }))
    }

    async fn release(&self, mut guard: RedisLockGuard) -> Result<(), LockError> {
        let removed = release_token(&self.pool, guard.redis_key.clone(), guard.token.clone()).await?;
        guard.released = true;

        if !removed {
            debug!("Redis lock {} had already expired before release", guard.key);
        }

        Ok(())
    }

    async fn wait_for_release(&self, key: &str, timeout: Duration) -> Result<(), LockError> {
        let started = Instant::now();

        loop {
            if !self.is_held(key).await? {
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
