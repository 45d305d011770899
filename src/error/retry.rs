use sea_orm::DbErr;

use super::{provider::ProviderError, Error};

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient upstream or connection failures)
    Retry,
    /// Failed permanently (bad input, unknown location, client errors)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::ProviderError(provider_error) => match provider_error {
                // Upstream is slow or unreachable, backoff and retry
                ProviderError::Timeout(_) => ErrorRetryStrategy::Retry,
                ProviderError::Request(_) => ErrorRetryStrategy::Retry,

                // 5xx is temporary unavailability; 4xx means the request itself is wrong
                ProviderError::Status { status, .. } if *status >= 500 => {
                    ErrorRetryStrategy::Retry
                }
                ProviderError::Status { .. } => ErrorRetryStrategy::Fail,

                // A malformed body won't fix itself on the next attempt
                ProviderError::InvalidResponse(_) => ErrorRetryStrategy::Fail,
            },

            Self::DbErr(db_err) => match db_err {
                // Connection acquisition & connection errors are transient
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                // Constraint violations, type conversions, schema issues: permanent
                _ => ErrorRetryStrategy::Fail,
            },

            // Lock errors only occur on the cached lookup path, never during refresh
            Self::LockError(_) => ErrorRetryStrategy::Fail,

            // Unknown or malformed location - retrying resolves to the same miss
            Self::LocationError(_) => ErrorRetryStrategy::Fail,

            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::NoDataAvailable { .. } => ErrorRetryStrategy::Fail,
            Self::ParseError(_) => ErrorRetryStrategy::Fail,
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
