use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockError {
    /// The key was still held when the wait bound elapsed.
    #[error("Timed out after {timeout:?} waiting for lock {key} to be released")]
    WaitTimeout { key: String, timeout: Duration },
    /// Redis lock backend error (connection, command or script execution).
    #[cfg(feature = "redis")]
    #[error(transparent)]
    Redis(#[from] fred::prelude::Error),
}
