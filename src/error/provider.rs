//! Upstream provider error types.

use thiserror::Error;

/// Errors produced by a [`PrayerTimeProvider`](crate::provider::PrayerTimeProvider).
///
/// All variants are recoverable from the orchestrator's point of view: a lookup that
/// hits one of these falls back to stale cached data.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request did not complete within the configured timeout.
    #[error("Provider request timed out: {0}")]
    Timeout(String),
    /// Transport-level failure (connection refused, DNS, TLS, body read).
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    /// The provider answered with a non-success HTTP status.
    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response decoded but did not contain usable timings.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}
