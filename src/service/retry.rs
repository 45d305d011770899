//! Retry logic with exponential backoff for service operations.
//!
//! This module provides the `RetryContext` for executing operations with automatic retry
//! logic and exponential backoff. It supports caching between retry attempts so that data
//! already fetched from the upstream provider is reused when only persisting it failed,
//! and integrates with the error system to determine which errors are retryable.

use std::time::Duration;

use crate::error::{retry::ErrorRetryStrategy, Error};

/// Context for executing operations with automatic retry logic and caching.
///
/// # Type Parameters
///
/// - `T` - Cache type that must implement `Clone + Default`. The refresh path uses
///   `Option<FetchedTimings>` so an upstream response survives a failed write.
///
/// # Retry Behavior
///
/// - **Max attempts**: 3 (default)
/// - **Backoff strategy**: Exponential starting at 1 second (1s, 2s, 4s, ...)
/// - **Retry conditions**: Only errors with `ErrorRetryStrategy::Retry` are retried
/// - **Permanent failures**: Errors with `ErrorRetryStrategy::Fail` return immediately
///
/// # Example
///
/// ```ignore
/// let mut ctx: RetryContext<Option<FetchedTimings>> = RetryContext::new();
///
/// ctx.execute_with_retry("refresh of izmir on 2026-02-10", async |cache| {
///     let fetched = match cache.clone() {
///         Some(fetched) => fetched,
///         None => cache.insert(service.fetch(&location, date).await?).clone(),
///     };
///
///     service.persist(&location, fetched).await
/// })
/// .await?;
/// ```
pub struct RetryContext<T> {
    /// Cache to be used between retries to prevent unnecessary additional fetches
    cache: T,
    /// Maximum number of attempts before giving up
    max_attempts: u32,
    /// Initial backoff duration (doubles with each retry)
    initial_backoff: Duration,
}

impl<T> RetryContext<T>
where
    T: Clone + Default,
{
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);

    /// Creates a new retry context with 3 max attempts and 1 second initial backoff.
    pub fn new() -> Self {
        Self {
            cache: T::default(),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Self::DEFAULT_INITIAL_BACKOFF,
        }
    }

    /// Override the attempt limit and initial backoff.
    ///
    /// `max_attempts` is clamped to at least 1.
    pub fn with_backoff(mut self, max_attempts: u32, initial_backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.initial_backoff = initial_backoff;
        self
    }

    /// Data cached by previous attempts.
    pub fn cache(&self) -> &T {
        &self.cache
    }

    /// Delay before retry number `retry` (1-based): `initial_backoff * 2^(retry - 1)`,
    /// saturating instead of overflowing for large attempt counts.
    fn backoff(&self, retry: u32) -> Duration {
        let factor = 2_u32.saturating_pow(retry.saturating_sub(1));

        self.initial_backoff.saturating_mul(factor)
    }

    /// Executes an operation with automatic retry logic and exponential backoff.
    ///
    /// Runs the provided async operation up to `max_attempts` times, retrying on transient
    /// failures. The cache persists between retry attempts, allowing operations to skip
    /// redundant fetches.
    ///
    /// # Arguments
    /// - `description` - Human-readable description for logging (e.g., "refresh of izmir")
    /// - `operation` - Async closure that receives mutable cache reference and returns `Result<R, Error>`
    ///
    /// # Returns
    /// - `Ok(R)` - Operation succeeded
    /// - `Err(Error)` - Operation failed permanently or exhausted all retry attempts
    pub async fn execute_with_retry<R, F>(
        &mut self,
        description: &str,
        operation: F,
    ) -> Result<R, Error>
    where
        F: AsyncFn(&mut T) -> Result<R, Error>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            match operation(&mut self.cache).await {
                Ok(result) => {
                    tracing::debug!("Successfully processed {}", description);
                    return Ok(result);
                }
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => {
                        tracing::error!("Permanent error for {}: {:?}", description, e);
                        return Err(e);
                    }
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {:?}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff = self.backoff(attempt_count);

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}

impl<T> Default for RetryContext<T>
where
    T: Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
