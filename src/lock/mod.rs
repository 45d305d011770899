//! Single-flight locks.
//!
//! A named-lock registry used to collapse concurrent cache misses for the same key into a
//! single upstream call. Locks expire on their own once their TTL has elapsed, so a holder
//! that never releases (panic, cancelled task) cannot wedge a key.
//!
//! ## Backends
//!
//! - [`LocalLockRegistry`] - process memory only. Concurrent callers in one process are
//!   coalesced; separate instances of the service each hold their own registry and do not
//!   coordinate with each other.
//! - `RedisLockRegistry` (feature `redis`) - `SET NX PX` on a shared redis/valkey, for
//!   deployments running several instances against one database.
//!
//! Waiting is done by polling at a fixed interval rather than by notification.

pub mod local;
#[cfg(feature = "redis")]
pub mod redis;

use std::{future::Future, time::Duration};

use crate::error::lock::LockError;

pub use local::{LocalLockGuard, LocalLockRegistry};
#[cfg(feature = "redis")]
pub use redis::{RedisLockGuard, RedisLockRegistry};

/// Interval between checks in `wait_for_release`.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Named, TTL-bounded mutual exclusion.
///
/// Acquiring returns a guard owned by the holder. Dropping the guard releases the key, so
/// a holder whose future is cancelled mid-fetch does not keep the key until its TTL. A
/// guard only ever releases its own acquisition: once its TTL has elapsed and another
/// holder has claimed the key, releasing the stale guard leaves the new holder in place.
pub trait SingleFlightLock: Send + Sync {
    type Guard: Send;

    /// Claim `key` for at most `ttl` without blocking.
    ///
    /// # Returns
    /// - `Ok(Some(guard))` - The key was free (or its previous holder expired) and is now held
    /// - `Ok(None)` - Another holder owns the key and has not expired
    fn try_acquire(
        &self,
        key: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<Option<Self::Guard>, LockError>> + Send;

    /// Release the acquisition held by `guard`.
    ///
    /// A no-op when the key already expired or now belongs to another holder. Dropping the
    /// guard has the same effect without reporting backend errors.
    fn release(&self, guard: Self::Guard) -> impl Future<Output = Result<(), LockError>> + Send;

    /// Wait until `key` is free, polling at the backend's interval.
    ///
    /// # Returns
    /// - `Ok(())` - The key was released or expired
    /// - `Err(LockError::WaitTimeout)` - The key was still held after `timeout`
    fn wait_for_release(
        &self,
        key: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), LockError>> + Send;
}
