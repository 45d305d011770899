//! Error types for prayer-time resolution.
//!
//! Domain errors live in their own modules (configuration, location lookup, upstream
//! provider, single-flight lock) and are aggregated into the crate-level [`Error`] via
//! `thiserror`'s `#[from]`, so `?` works across component boundaries.
//!
//! Only [`Error::NoDataAvailable`] and [`LocationError`] are expected to reach callers of
//! the orchestrator: provider and lock errors on the cache-miss path are absorbed into the
//! stale-data fallback.

pub mod config;
pub mod location;
pub mod lock;
pub mod provider;
pub mod retry;

use chrono::NaiveDate;
use thiserror::Error;

use crate::error::{
    config::ConfigError, location::LocationError, lock::LockError, provider::ProviderError,
};

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Location could not be validated or mapped to coordinates.
    #[error(transparent)]
    LocationError(#[from] LocationError),
    /// Upstream provider failed, timed out, or returned an unusable response.
    #[error(transparent)]
    ProviderError(#[from] ProviderError),
    /// Single-flight lock error (wait timeout, lock backend failure).
    #[error(transparent)]
    LockError(#[from] LockError),
    /// Neither fresh nor previously cached data exists for the location.
    ///
    /// This is the only terminal outcome of a lookup; every other failure on the
    /// cache-miss path falls back to the most recent cached record first.
    #[error("No prayer time data available for {location} on {date}")]
    NoDataAvailable { location: String, date: NaiveDate },
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}
